use farmlok::forms;
use farmlok::models;
use serde_valid::Validate;
use uuid::Uuid;

#[test]
fn deserialize_add_product_ignores_caller_supplied_owner() {
    let body_str = r#"
    {
        "name": "Tomato",
        "description": "Fresh farm product",
        "price": 42.5,
        "category": "Vegetables",
        "stock": 10,
        "location": "Delhi",
        "createdBy": "an-id-the-caller-must-not-control"
    }
    "#;

    let form = serde_json::from_str::<forms::product::Add>(body_str).unwrap();
    assert!(form.validate().is_ok());

    let user_id = Uuid::new_v4();
    let product = form.into_product(user_id);
    assert_eq!(product.created_by, user_id);
    assert_eq!(product.rating, 0.0);
}

#[test]
fn add_product_rejects_negative_price() {
    let body_str = r#"
    {
        "name": "Tomato",
        "description": "Fresh farm product",
        "price": -5,
        "category": "Vegetables",
        "stock": 10,
        "location": "Delhi"
    }
    "#;

    let form = serde_json::from_str::<forms::product::Add>(body_str).unwrap();
    let errors = form.validate().unwrap_err().to_string();
    assert!(errors.contains("price"), "got {:?}", errors);
}

#[test]
fn update_product_merges_only_present_fields() {
    let body_str = r#"{ "price": 55.0, "stock": 3 }"#;
    let form = serde_json::from_str::<forms::product::Update>(body_str).unwrap();
    assert!(form.validate().is_ok());

    let mut product = models::Product {
        name: "Tomato".to_string(),
        description: "Fresh farm product".to_string(),
        price: 42.5,
        category: "Vegetables".to_string(),
        stock: 10,
        location: "Delhi".to_string(),
        rating: 4.0,
        ..models::Product::default()
    };

    form.update(&mut product);

    assert_eq!(product.price, 55.0);
    assert_eq!(product.stock, 3);
    assert_eq!(product.name, "Tomato");
    assert_eq!(product.rating, 4.0);
}

#[test]
fn update_product_rejects_out_of_range_rating() {
    let form = serde_json::from_str::<forms::product::Update>(r#"{ "rating": 9.0 }"#).unwrap();
    let errors = form.validate().unwrap_err().to_string();
    assert!(errors.contains("rating"), "got {:?}", errors);
}

#[test]
fn merged_invariants_catch_bad_updates() {
    let mut product = models::Product {
        name: "Tomato".to_string(),
        description: "Fresh farm product".to_string(),
        price: 42.5,
        category: "Vegetables".to_string(),
        stock: 10,
        location: "Delhi".to_string(),
        ..models::Product::default()
    };
    assert!(product.invariants().is_ok());

    product.stock = -1;
    assert!(product.invariants().is_err());
}
