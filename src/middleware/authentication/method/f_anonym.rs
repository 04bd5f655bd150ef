use actix_web::dev::ServiceRequest;
use actix_web::http::Method;

// Reads stay public; anything that mutates the catalog needs an identity.
#[tracing::instrument(name = "authenticate as anonym")]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    if req.method() != Method::GET {
        return Err("You are not logged in! Please log in to get access.".to_string());
    }

    Ok(true)
}
