//! Request helpers
//!
//! Content negotiation and the extractors for note attributes and path
//! parameters, with their rejections mapped onto the shared [`Error`] type

use std::convert::Infallible;

use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Form;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::http::header::ACCEPT;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::render::Error;
use super::render::TURBO_STREAM;

/// The representation the client asked for
///
/// Decided by the `Accept` header, independent of what the handler does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientFormat {
    /// A server rendered HTML page
    Html,

    /// A JSON document
    Json,

    /// A turbo-stream fragment
    Stream,
}

impl ClientFormat {
    fn from_accept(accept: &str) -> Self {
        if accept.contains(TURBO_STREAM) {
            Self::Stream
        } else if accept.contains("application/json") {
            Self::Json
        } else {
            Self::Html
        }
    }

    fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map_or(Self::Html, Self::from_accept)
    }
}

impl<S> FromRequestParts<S> for ClientFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Allow-listed note attributes submitted by the client
///
/// Only `title` and `body` make it through; everything else the client
/// sends is dropped here, before validation or storage ever see it.
/// `_method` is transport plumbing for plain HTML forms, not an attribute.
#[derive(Debug, Deserialize)]
pub struct NoteParams {
    /// Title of the note
    #[serde(default)]
    pub title: String,

    /// Body of the note
    #[serde(default)]
    pub body: String,

    /// Verb a plain HTML form actually means
    #[serde(default, rename = "_method")]
    pub method: Option<String>,
}

/// Extractor for note attributes
///
/// Accepts a JSON document or an urlencoded HTML form, decided by the
/// request's content type
pub struct NoteForm(pub NoteParams);

impl<S> FromRequest<S> for NoteForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ClientFormat::from_headers(req.headers());

        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let json = Json::<NoteParams>::from_request(req, state).await;

            parse_json(json, format).map(NoteForm)
        } else {
            let form = Form::<NoteParams>::from_request(req, state).await;

            parse_form(form, format).map(NoteForm)
        }
    }
}

fn parse_json(
    json: Result<Json<NoteParams>, JsonRejection>,
    format: ClientFormat,
) -> Result<NoteParams, Error> {
    match json {
        Ok(Json(params)) => Ok(params),
        Err(err) => Err(match err {
            JsonRejection::JsonDataError(err) => {
                Error::bad_request("Data error").with_description(err)
            }
            JsonRejection::JsonSyntaxError(err) => {
                Error::bad_request("JSON syntax error").with_description(err)
            }
            JsonRejection::MissingJsonContentType(_err) => Error::bad_request(
                "Missing `application/json` content type",
            ),
            JsonRejection::BytesRejection(err) => {
                Error::bad_request("Invalid characters in JSON").with_description(err)
            }
            err => Error::bad_request("Unknown JSON error").with_description(err),
        }
        .with_format(format)),
    }
}

fn parse_form(
    form: Result<Form<NoteParams>, FormRejection>,
    format: ClientFormat,
) -> Result<NoteParams, Error> {
    match form {
        Ok(Form(params)) => Ok(params),
        Err(err) => Err(match err {
            FormRejection::InvalidFormContentType(_err) => Error::bad_request(
                "Missing `application/x-www-form-urlencoded` content type",
            ),
            FormRejection::FailedToDeserializeForm(err) => {
                Error::bad_request("Data error").with_description(err)
            }
            FormRejection::FailedToDeserializeFormBody(err) => {
                Error::bad_request("Data error").with_description(err)
            }
            FormRejection::BytesRejection(err) => {
                Error::bad_request("Invalid characters in form").with_description(err)
            }
            err => Error::bad_request("Unknown form error").with_description(err),
        }
        .with_format(format)),
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let format = ClientFormat::from_headers(&parts.headers);

        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path, format).map(PathParameters)
    }
}

fn parse_path<P>(
    path: Result<Path<P>, PathRejection>,
    format: ClientFormat,
) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => Err(match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Error::bad_request("Invalid path parameter").with_description(err)
            }
            PathRejection::MissingPathParams(err) => {
                Error::bad_request("Missing path parameter").with_description(err)
            }
            err => Error::bad_request("Unknown path error").with_description(err),
        }
        .with_format(format)),
    }
}
