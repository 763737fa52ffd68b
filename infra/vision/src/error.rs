use std::borrow::Cow;

/// Failures talking to the object-detection service.
#[chub_derive::chub_error]
pub enum VisionError {
    /// The detector endpoint or client settings are unusable.
    #[error("Vision configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Connection, timeout or body transfer failure.
    #[error("Vision transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The detector answered with a non-success status.
    #[error("Vision service returned {status}{}: {body}", format_context(.context))]
    Status { status: u16, body: String, context: Option<Cow<'static, str>> },

    /// The detector answered with a body that is not `{"objects": [...]}`.
    #[error("Vision response decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal vision error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
