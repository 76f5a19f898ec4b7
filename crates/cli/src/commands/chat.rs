//! Shopping assistant.

use void_storefront::{ClientError, Storefront};

use super::output;

pub async fn ask(storefront: &Storefront, question: &str) -> Result<(), ClientError> {
    let answer = storefront.chatbot().query(question).await?;
    output::line(&answer);
    Ok(())
}
