use crate::{
    apis::{path_segment, EndpointClient, Namespace, Params},
    response::ResponseEnvelope,
    Error,
};

/// Namespace of the banks APIs.
#[derive(Debug, Clone, Copy)]
pub enum Banks {}

impl Namespace for Banks {
    const NAMESPACE: &'static str = "banks";
}

/// Iamport banks APIs client.
pub type BanksApi = EndpointClient<Banks>;

impl EndpointClient<Banks> {
    /// Lists the standard codes and names of all banks.
    #[tracing::instrument(name = "List Banks", skip(self))]
    pub async fn list(&self) -> Result<ResponseEnvelope, Error> {
        self.get("", &Params::new()).await
    }

    /// Gets a bank by its standard code.
    #[tracing::instrument(name = "Get Bank", skip(self))]
    pub async fn get_bank(&self, bank_standard_code: &str) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!("/{}", path_segment(bank_standard_code)),
            &Params::new(),
        )
        .await
    }
}
