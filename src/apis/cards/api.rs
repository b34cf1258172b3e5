use crate::{
    apis::{path_segment, EndpointClient, Namespace, Params},
    response::ResponseEnvelope,
    Error,
};

/// Namespace of the card issuers APIs.
#[derive(Debug, Clone, Copy)]
pub enum Cards {}

impl Namespace for Cards {
    const NAMESPACE: &'static str = "cards";
}

/// Iamport card issuers APIs client.
pub type CardsApi = EndpointClient<Cards>;

impl EndpointClient<Cards> {
    /// Lists the standard codes and names of all card issuers.
    #[tracing::instrument(name = "List Cards", skip(self))]
    pub async fn list(&self) -> Result<ResponseEnvelope, Error> {
        self.get("", &Params::new()).await
    }

    /// Gets a card issuer by its standard code.
    #[tracing::instrument(name = "Get Card", skip(self))]
    pub async fn get_card(&self, card_standard_code: &str) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!("/{}", path_segment(card_standard_code)),
            &Params::new(),
        )
        .await
    }
}
