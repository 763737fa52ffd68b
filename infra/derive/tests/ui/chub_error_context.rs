use chub_derive::chub_error;
use std::borrow::Cow;

#[chub_error]
pub enum UploadError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Read { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), UploadError> {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    io.context("Reading photo")
}

fn internal() -> Result<(), UploadError> {
    Err("boom".into())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "Read failed (Reading photo): disk");

    let err = internal().context("Matching").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Matching): boom");
}
