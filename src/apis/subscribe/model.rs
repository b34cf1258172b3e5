use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Payment gateways supported by Iamport.
///
/// The `pg` parameter also accepts `{pg}.{store id}` when several stores use the same gateway,
/// which is why request models take a plain `String`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Pg {
    #[serde(rename = "html5_inicis")]
    InicisWebStandard,
    #[serde(rename = "inicis")]
    InicisActiveX,
    #[serde(rename = "kcp")]
    NhnKcp,
    #[serde(rename = "kcp_billing")]
    NhnKcpBilling,
    #[serde(rename = "uplus")]
    LgUplus,
    #[serde(rename = "nice")]
    NicePay,
    #[serde(rename = "jtnet")]
    JtNet,
    #[serde(rename = "kakao")]
    KakaoPay,
    #[serde(rename = "danal")]
    DanalPhone,
    #[serde(rename = "danal_tpay")]
    DanalGeneral,
    #[serde(rename = "mobilians")]
    Mobilians,
    #[serde(rename = "syrup")]
    SyrupPay,
    #[serde(rename = "payco")]
    Payco,
    #[serde(rename = "paypal")]
    Paypal,
    #[serde(rename = "eximbay")]
    Eximbay,
    #[serde(rename = "naverco")]
    NaverPay,
}

impl Pg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pg::InicisWebStandard => "html5_inicis",
            Pg::InicisActiveX => "inicis",
            Pg::NhnKcp => "kcp",
            Pg::NhnKcpBilling => "kcp_billing",
            Pg::LgUplus => "uplus",
            Pg::NicePay => "nice",
            Pg::JtNet => "jtnet",
            Pg::KakaoPay => "kakao",
            Pg::DanalPhone => "danal",
            Pg::DanalGeneral => "danal_tpay",
            Pg::Mobilians => "mobilians",
            Pg::SyrupPay => "syrup",
            Pg::Payco => "payco",
            Pg::Paypal => "paypal",
            Pg::Eximbay => "eximbay",
            Pg::NaverPay => "naverco",
        }
    }
}

impl Display for Pg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Pg> for String {
    fn from(pg: Pg) -> Self {
        pg.as_str().to_string()
    }
}

/// Card used to issue a billing key or to pay once.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into))]
pub struct CardDetails {
    /// Formatted as `XXXX-XXXX-XXXX-XXXX`.
    pub card_number: String,
    /// Formatted as `YYYY-MM`.
    pub expiry: String,
    /// Card holder birth date (`YYMMDD`), or the 10-digit business registration number.
    pub birth: String,
    /// First two digits of the card password.
    #[builder(default, setter(into, strip_option))]
    pub pwd_2digit: Option<String>,
}

/// Buyer information attached to a payment.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct Buyer {
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_tel: Option<String>,
    pub buyer_addr: Option<String>,
    pub buyer_postcode: Option<String>,
}

/// Issues (or replaces) the billing key stored under a `customer_uid`.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct IssueBillkeyRequest {
    #[serde(flatten)]
    pub card: CardDetails,
    #[builder(default, setter(into, strip_option))]
    pub pg: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_tel: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_email: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_addr: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_postcode: Option<String>,
}

/// Pays once with card details.
///
/// If `customer_uid` is set, Iamport also stores the card as a billing key under it.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct OnetimePaymentRequest {
    #[builder(setter(into))]
    pub merchant_uid: String,
    pub amount: u64,
    #[builder(default, setter(strip_option))]
    pub tax_free: Option<u64>,
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,
    #[serde(flatten)]
    pub card: CardDetails,
    #[builder(default, setter(into, strip_option))]
    pub customer_uid: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pg: Option<String>,
    #[serde(flatten)]
    #[builder(default)]
    pub buyer: Buyer,
    /// Installment months. `0` pays in full.
    #[builder(default, setter(strip_option))]
    pub card_quota: Option<u32>,
    #[builder(default, setter(into, strip_option))]
    pub custom_data: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub notice_url: Option<String>,
}

/// Charges a stored billing key again.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct AgainPaymentRequest {
    #[builder(setter(into))]
    pub customer_uid: String,
    #[builder(setter(into))]
    pub merchant_uid: String,
    pub amount: u64,
    #[builder(default, setter(strip_option))]
    pub tax_free: Option<u64>,
    #[builder(setter(into))]
    pub name: String,
    #[serde(flatten)]
    #[builder(default)]
    pub buyer: Buyer,
    #[builder(default, setter(strip_option))]
    pub card_quota: Option<u32>,
    #[builder(default, setter(into, strip_option))]
    pub custom_data: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub notice_url: Option<String>,
}
