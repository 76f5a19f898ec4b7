//! Account commands: login, logout, whoami, register, orders.

use void_core::{Email, Phone, Registration};
use void_storefront::models::Credentials;
use void_storefront::services::AuthError;
use void_storefront::{ClientError, Storefront};

use super::output;

pub async fn login(storefront: &Storefront, email: &str, password: String) -> Result<(), ClientError> {
    let credentials = Credentials::new(email, password).map_err(AuthError::from)?;
    let session = storefront.login(&credentials).await?;
    output::session(&session);
    Ok(())
}

pub async fn logout(storefront: &Storefront) {
    storefront.logout().await;
}

pub async fn whoami(storefront: &Storefront) -> Result<(), ClientError> {
    match storefront.auth().active_session().await {
        Some(session) => output::session(&session),
        None => {
            let guest = storefront.guest().get_or_create().await?;
            output::line(&format!("Invitado (sesión {guest})"));
        }
    }
    Ok(())
}

pub async fn register(
    storefront: &Storefront,
    email: &str,
    name: String,
    last_name: String,
    password: String,
    phone: Option<Phone>,
) -> Result<(), ClientError> {
    let registration = Registration {
        email: Email::parse(email).map_err(AuthError::from)?,
        name,
        last_name,
        password,
        phone,
    };
    let profile = storefront.register(&registration).await?;
    output::line(&format!("Cuenta creada para {}", profile.email));
    Ok(())
}

pub async fn orders(storefront: &Storefront) -> Result<(), ClientError> {
    let orders = storefront.checkout().my_orders().await?;
    output::orders(&orders);
    Ok(())
}
