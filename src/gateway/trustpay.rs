//! Bank JSON-gateway envelope ("TrustPay" style).
//!
//! The gateway exchanges JSON envelopes: a `Message` document plus a
//! detached `Signature-Algorithm`/`Signature` pair. The signature covers
//! the canonical JSON serialization of the message: field order follows
//! struct declaration order and empty optional fields are omitted, so the
//! types below are the wire format definition, not just a convenience.
//!
//! Requests are signed with `SHA1withRSA` over the UTF-8 message bytes;
//! response signatures are computed by the gateway over the GBK encoding
//! of the response message ([`SignatureScheme::trustpay`] captures both
//! choices).
//!
//! [`SignatureScheme::trustpay`]: crate::sign::SignatureScheme::trustpay

use serde::{Deserialize, Serialize};

use crate::canonical::json;
use crate::error::Result;
use crate::sign::{RequestSigner, ResponseVerifier};

/// Protocol version carried in every request message.
pub const REQUEST_VERSION: &str = "V3.0.0";
/// Message format label carried in every request message.
pub const REQUEST_FORMAT: &str = "JSON";
/// E-commerce merchant type for the online business channel.
pub const MERCHANT_TYPE_EBUS: &str = "EBUS";
/// Transaction type of a payment request.
pub const TRX_TYPE_PAY_REQUEST: &str = "PayReq";
/// Pay type for immediate (non-preauthorized) payment.
pub const PAY_TYPE_IMMEDIATE: &str = "ImmediatePay";

/// Merchant identification block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Merchant channel type (`EBUS` for online business).
    #[serde(rename = "ECMerchantType", skip_serializing_if = "String::is_empty", default)]
    pub merchant_type: String,

    /// Merchant identifier issued by the gateway.
    #[serde(rename = "MerchantID", skip_serializing_if = "String::is_empty", default)]
    pub merchant_id: String,
}

impl Merchant {
    /// A merchant block for the online business channel.
    #[must_use]
    pub fn ebus(merchant_id: impl Into<String>) -> Self {
        Self { merchant_type: MERCHANT_TYPE_EBUS.to_owned(), merchant_id: merchant_id.into() }
    }
}

/// One line item of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Sub-merchant display name.
    #[serde(rename = "SubMerName", skip_serializing_if = "String::is_empty", default)]
    pub sub_merchant_name: String,

    /// Sub-merchant identifier.
    #[serde(rename = "SubMerId", skip_serializing_if = "String::is_empty", default)]
    pub sub_merchant_id: String,

    /// Sub-merchant category code.
    #[serde(rename = "SubMerMCC", skip_serializing_if = "String::is_empty", default)]
    pub sub_merchant_mcc: String,

    /// Free-form sub-merchant remarks.
    #[serde(rename = "SubMerchantRemarks", skip_serializing_if = "String::is_empty", default)]
    pub sub_merchant_remarks: String,

    /// Product identifier.
    #[serde(rename = "ProductID", skip_serializing_if = "String::is_empty", default)]
    pub product_id: String,

    /// Product display name.
    #[serde(rename = "ProductName", skip_serializing_if = "String::is_empty", default)]
    pub product_name: String,

    /// Unit price, decimal string.
    #[serde(rename = "UnitPrice", skip_serializing_if = "String::is_empty", default)]
    pub unit_price: String,

    /// Quantity, decimal string.
    #[serde(rename = "Qty", skip_serializing_if = "String::is_empty", default)]
    pub quantity: String,

    /// Free-form product remarks.
    #[serde(rename = "ProductRemarks", skip_serializing_if = "String::is_empty", default)]
    pub product_remarks: String,

    /// Product type code.
    #[serde(rename = "ProductType", skip_serializing_if = "String::is_empty", default)]
    pub product_type: String,

    /// Discount, decimal string.
    #[serde(rename = "ProductDiscount", skip_serializing_if = "String::is_empty", default)]
    pub product_discount: String,

    /// Product expiry date.
    #[serde(rename = "ProductExpiredDate", skip_serializing_if = "String::is_empty", default)]
    pub product_expired_date: String,
}

/// Order details of a payment request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Payment mode (`ImmediatePay`, `PreAuthPay`, ...).
    #[serde(rename = "PayTypeID", skip_serializing_if = "String::is_empty", default)]
    pub pay_type_id: String,

    /// Order date, `YYYY/MM/DD`.
    #[serde(rename = "OrderDate", skip_serializing_if = "String::is_empty", default)]
    pub order_date: String,

    /// Order time, `HH:MM:SS`.
    #[serde(rename = "OrderTime", skip_serializing_if = "String::is_empty", default)]
    pub order_time: String,

    /// Order timeout, `YYYYMMDDHHMMSS`. Lower-case key on the wire.
    #[serde(rename = "orderTimeoutDate", skip_serializing_if = "String::is_empty", default)]
    pub order_timeout_date: String,

    /// Merchant-side order number.
    #[serde(rename = "OrderNo", skip_serializing_if = "String::is_empty", default)]
    pub order_no: String,

    /// ISO 4217 numeric currency code.
    #[serde(rename = "CurrencyCode", skip_serializing_if = "String::is_empty", default)]
    pub currency_code: String,

    /// Order amount, decimal string.
    #[serde(rename = "OrderAmount", skip_serializing_if = "String::is_empty", default)]
    pub order_amount: String,

    /// Subsidy amount, decimal string.
    #[serde(rename = "SubsidyAmount", skip_serializing_if = "String::is_empty", default)]
    pub subsidy_amount: String,

    /// Fee, decimal string.
    #[serde(rename = "Fee", skip_serializing_if = "String::is_empty", default)]
    pub fee: String,

    /// Receiving account number.
    #[serde(rename = "AccountNo", skip_serializing_if = "String::is_empty", default)]
    pub account_no: String,

    /// Order description.
    #[serde(rename = "OrderDesc", skip_serializing_if = "String::is_empty", default)]
    pub order_desc: String,

    /// Merchant order URL.
    #[serde(rename = "OrderURL", skip_serializing_if = "String::is_empty", default)]
    pub order_url: String,

    /// Receiver address.
    #[serde(rename = "ReceiverAddress", skip_serializing_if = "String::is_empty", default)]
    pub receiver_address: String,

    /// Installment flag.
    #[serde(rename = "InstallmentMark", skip_serializing_if = "String::is_empty", default)]
    pub installment_mark: String,

    /// Commodity type code.
    #[serde(rename = "CommodityType", skip_serializing_if = "String::is_empty", default)]
    pub commodity_type: String,

    /// Buyer IP address.
    #[serde(rename = "BuyIP", skip_serializing_if = "String::is_empty", default)]
    pub buy_ip: String,

    /// Order validity in minutes.
    #[serde(rename = "ExpiredDate", skip_serializing_if = "String::is_empty", default)]
    pub expired_date: String,

    /// Split-account details.
    #[serde(rename = "SplitAccInfoItems", skip_serializing_if = "String::is_empty", default)]
    pub split_acc_info_items: String,

    /// Order line items.
    #[serde(rename = "OrderItems", skip_serializing_if = "Vec::is_empty", default)]
    pub order_items: Vec<OrderItem>,
}

/// Transaction request block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrxRequest {
    /// Transaction type (`PayReq` for payment).
    #[serde(rename = "TrxType", skip_serializing_if = "String::is_empty", default)]
    pub trx_type: String,

    /// Order details.
    #[serde(rename = "Order", skip_serializing_if = "Option::is_none", default)]
    pub order: Option<Order>,

    /// Payment channel code.
    #[serde(rename = "PaymentType", skip_serializing_if = "String::is_empty", default)]
    pub payment_type: String,

    /// Payment link type (PC / mobile).
    #[serde(rename = "PaymentLinkType", skip_serializing_if = "String::is_empty", default)]
    pub payment_link_type: String,

    /// Receiving account number.
    #[serde(rename = "ReceiveAccount", skip_serializing_if = "String::is_empty", default)]
    pub receive_account: String,

    /// Receiving account name.
    #[serde(rename = "ReceiveAccName", skip_serializing_if = "String::is_empty", default)]
    pub receive_acc_name: String,

    /// Notification mode (`0` for server notification).
    #[serde(rename = "NotifyType", skip_serializing_if = "String::is_empty", default)]
    pub notify_type: String,

    /// Result notification callback URL.
    #[serde(rename = "ResultNotifyURL", skip_serializing_if = "String::is_empty", default)]
    pub result_notify_url: String,

    /// Free-form merchant remarks.
    #[serde(rename = "MerchantRemarks", skip_serializing_if = "String::is_empty", default)]
    pub merchant_remarks: String,

    /// Split-account flag.
    #[serde(rename = "IsBreakAccount", skip_serializing_if = "String::is_empty", default)]
    pub is_break_account: String,

    /// Split-account template identifier.
    #[serde(rename = "SplitAccTemplate", skip_serializing_if = "String::is_empty", default)]
    pub split_acc_template: String,
}

/// The message document whose canonical JSON bytes get signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    /// Protocol version ([`REQUEST_VERSION`]).
    #[serde(rename = "Version", skip_serializing_if = "String::is_empty", default)]
    pub version: String,

    /// Message format ([`REQUEST_FORMAT`]).
    #[serde(rename = "Format", skip_serializing_if = "String::is_empty", default)]
    pub format: String,

    /// Merchant identification.
    #[serde(rename = "Merchant", skip_serializing_if = "Option::is_none", default)]
    pub merchant: Option<Merchant>,

    /// Transaction request.
    #[serde(rename = "TrxRequest", skip_serializing_if = "Option::is_none", default)]
    pub trx_request: Option<TrxRequest>,
}

impl RequestMessage {
    /// Assembles a message with the standard version and format labels.
    #[must_use]
    pub fn new(merchant: Merchant, trx_request: TrxRequest) -> Self {
        Self {
            version: REQUEST_VERSION.to_owned(),
            format: REQUEST_FORMAT.to_owned(),
            merchant: Some(merchant),
            trx_request: Some(trx_request),
        }
    }

    /// The canonical JSON bytes of this message, the exact input to the
    /// signature.
    ///
    /// # Errors
    ///
    /// As [`json::message_bytes`].
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        json::message_bytes(self)
    }
}

/// A signed request envelope ready for serialization to the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedRequest {
    /// The message document.
    #[serde(rename = "Message")]
    pub message: RequestMessage,

    /// Signature algorithm label (e.g. `SHA1withRSA`).
    #[serde(rename = "Signature-Algorithm")]
    pub signature_algorithm: String,

    /// Base64-encoded signature over the canonical message bytes.
    #[serde(rename = "Signature")]
    pub signature: String,
}

impl SignedRequest {
    /// Canonicalizes `message` and signs it.
    ///
    /// # Errors
    ///
    /// Serialization or signing failures from the underlying layers.
    pub fn create(message: RequestMessage, signer: &RequestSigner) -> Result<Self> {
        let canonical = message.canonical_bytes()?;
        let signature = signer.sign(&canonical)?;
        Ok(Self {
            message,
            signature_algorithm: signer.algorithm_label().to_owned(),
            signature,
        })
    }

    /// Serializes the envelope to its JSON wire form.
    ///
    /// # Errors
    ///
    /// As [`json::message_string`].
    pub fn to_json(&self) -> Result<String> {
        json::message_string(self)
    }
}

/// The response message document covered by the gateway's signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Protocol version.
    #[serde(rename = "Version", skip_serializing_if = "String::is_empty", default)]
    pub version: String,

    /// Message format.
    #[serde(rename = "Format", skip_serializing_if = "String::is_empty", default)]
    pub format: String,

    /// Merchant identification echoed back.
    #[serde(rename = "Merchant", skip_serializing_if = "Option::is_none", default)]
    pub merchant: Option<Merchant>,

    /// Gateway return code (`0000` on success).
    #[serde(rename = "ReturnCode", skip_serializing_if = "String::is_empty", default)]
    pub return_code: String,

    /// Human-readable result description.
    #[serde(rename = "ErrorMessage", skip_serializing_if = "String::is_empty", default)]
    pub error_message: String,

    /// Echoed transaction type.
    #[serde(rename = "TrxType", skip_serializing_if = "String::is_empty", default)]
    pub trx_type: String,

    /// Echoed merchant order number.
    #[serde(rename = "OrderNo", skip_serializing_if = "String::is_empty", default)]
    pub order_no: String,

    /// Cashier URL the buyer is redirected to.
    #[serde(rename = "PaymentURL", skip_serializing_if = "String::is_empty", default)]
    pub payment_url: String,

    /// Echoed order amount.
    #[serde(rename = "OrderAmount", skip_serializing_if = "String::is_empty", default)]
    pub order_amount: String,
}

/// The signed body inside a response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBody {
    /// The response message document.
    #[serde(rename = "Message")]
    pub message: ResponseMessage,

    /// Signature algorithm label.
    #[serde(rename = "Signature-Algorithm", default)]
    pub signature_algorithm: String,

    /// Base64-encoded gateway signature.
    #[serde(rename = "Signature")]
    pub signature: String,
}

/// The outer response envelope as received from the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The signed body.
    #[serde(rename = "MSG")]
    pub msg: ResponseBody,
}

impl ResponseEnvelope {
    /// Parses a response envelope from its JSON wire form.
    ///
    /// # Errors
    ///
    /// [`SignError::Serialize`](crate::error::SignError::Serialize) on
    /// malformed JSON.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Checks the gateway signature over the canonical response message.
    ///
    /// The verifier's scheme decides the digest and the GBK transcoding
    /// step; a mismatch is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Serialization, transcoding, or signature-decoding failures from the
    /// underlying layers.
    pub fn verify(&self, verifier: &ResponseVerifier) -> Result<bool> {
        let canonical = json::message_bytes(&self.msg.message)?;
        verifier.verify(&canonical, &self.msg.signature)
    }
}
