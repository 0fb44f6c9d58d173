use argon2::{Argon2, PasswordHash, PasswordVerifier};
use pos_backend::{
    db::{create_orm_conn, run_migrations},
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        users::{CreateUserRequest, UpdateUserRequest},
    },
    entity::users::{Entity as Users, UserRole},
    error::AppError,
    routes::params::ProductListQuery,
    services::{product_service, user_service},
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run catalog tests.");
            return Ok(None);
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    Ok(Some(AppState::new(orm)))
}

#[tokio::test]
async fn product_names_are_unique() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let name = format!("Espresso {}", Uuid::new_v4());

    let created = product_service::create_product(
        &state,
        CreateProductRequest {
            name: name.clone(),
            description: Some("Single shot".into()),
            price: Decimal::new(450, 2),
            image_uri: None,
        },
    )
    .await?
    .data
    .expect("product");
    assert!(created.active);

    let fetched = product_service::get_product(&state, created.id).await?;
    assert!(fetched.meta.is_some());
    assert_eq!(fetched.data.map(|p| p.name), Some(name.clone()));

    let duplicate = product_service::create_product(
        &state,
        CreateProductRequest {
            name: name.clone(),
            description: None,
            price: Decimal::ONE,
            image_uri: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // Renaming to its own name is not a conflict.
    let updated = product_service::update_product(
        &state,
        created.id,
        UpdateProductRequest {
            name: Some(name.clone()),
            description: Some(None),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price, Decimal::new(450, 2));

    let found = product_service::list_products(
        &state,
        ProductListQuery {
            q: Some(name.to_lowercase()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert!(found.items.iter().any(|p| p.id == created.id));

    product_service::delete_product(&state, created.id).await?;
    let gone = product_service::get_product(&state, created.id).await;
    assert!(matches!(gone, Err(AppError::NotFound("Product"))));

    Ok(())
}

#[tokio::test]
async fn user_emails_are_unique_and_passwords_hashed() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let email = format!("admin-{}@example.com", Uuid::new_v4());

    let user = user_service::create_user(
        &state,
        CreateUserRequest {
            email: email.clone(),
            name: "Admin".into(),
            password: "s3cret".into(),
            role: Some("admin".into()),
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(user.role, UserRole::Admin);

    let fetched = user_service::get_user(&state, user.id).await?;
    assert!(fetched.meta.is_some());

    let stored = Users::find_by_id(user.id)
        .one(&state.orm)
        .await?
        .expect("stored user");
    assert_ne!(stored.password_hash, "s3cret");
    let parsed = PasswordHash::new(&stored.password_hash).expect("phc string");
    assert!(
        Argon2::default()
            .verify_password(b"s3cret", &parsed)
            .is_ok()
    );

    let duplicate = user_service::create_user(
        &state,
        CreateUserRequest {
            email: email.clone(),
            name: "Other".into(),
            password: "x".into(),
            role: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let renamed = user_service::update_user(
        &state,
        user.id,
        UpdateUserRequest {
            email: Some(email),
            active: Some(false),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("user");
    assert!(!renamed.active);

    user_service::delete_user(&state, user.id).await?;
    let missing = user_service::delete_user(&state, user.id).await;
    assert!(matches!(missing, Err(AppError::NotFound("User"))));

    Ok(())
}
