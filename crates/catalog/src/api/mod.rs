pub(crate) mod gutendex;

use crate::{Error, ErrorKind};

/// Default search endpoint of the Gutendex book-metadata API.
pub const GUTENDEX_URL: &str = "https://gutendex.com/books/";

pub trait Client
where
    Self: Default,
{
    fn get_text(&self, url: &str) -> Result<String, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        let resp = self
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let body = resp
            .text()
            .map_err(|e| Error::wrap_with(ErrorKind::Deserialize, e, "Response body is not text"))?;

        if body.is_empty() {
            return Err(Error::new(ErrorKind::NoValue, "Response body is empty"));
        }
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_body_producer, last_requested_url, BodyProducer, MockClient,
    NetworkErrorProducer,
};

#[cfg(test)]
mod test {
    use std::{cell::RefCell, marker::PhantomData};

    use super::{Client, Error, ErrorKind};

    thread_local! {
        static REQUESTED_URL: RefCell<Option<String>> = RefCell::new(None);
    }

    /// The URL most recently passed to a [`MockClient`] on this thread.
    pub(crate) fn last_requested_url() -> String {
        REQUESTED_URL.with(|url| url.borrow().clone().unwrap_or_default())
    }

    /// Asserts the URL of the last search made through a [`MockClient`], so tests can check how
    /// a query ends up encoded in the request.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_eq!($expected, crate::api::last_requested_url());
        };
    }

    /// Supplies the response body a [`MockClient`] answers every request with.
    pub(crate) trait BodyProducer: Default {
        fn body() -> Result<String, Error>;
    }

    /// A [`Client`] that never touches the network: it remembers the requested URL and answers
    /// with the body of `P`.
    #[derive(Default)]
    pub(crate) struct MockClient<P: BodyProducer = EmptyBodyProducer>(PhantomData<P>);

    impl<P: BodyProducer> Client for MockClient<P> {
        fn get_text(&self, url: &str) -> Result<String, Error> {
            REQUESTED_URL.with(|last| last.replace(Some(url.to_owned())));
            P::body()
        }
    }

    /// Declares unit structs implementing [`BodyProducer`], one per `Name => body,` pair.
    macro_rules! impl_body_producer {
        ($($producer:ident => $body:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::BodyProducer for $producer {
                    fn body() -> Result<String, crate::Error> {
                        $body
                    }
                }
            )*
        };
    }
    impl_body_producer! {
        // what the reqwest client reports for a 200 with no content
        EmptyBodyProducer => Err(Error::new(ErrorKind::NoValue, "Response body is empty")),
        NetworkErrorProducer => Err(Error::new(ErrorKind::IO, "Network error")),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_body_producer;
}
