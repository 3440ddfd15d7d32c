use log::*;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};

use super::{Transport, TransportError};
use crate::{ApiConfig, LookupRequest};

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug)]
pub struct WebApiTransport {
	client: Option<Client>,
	base_url: String,
	api_key: SecretString,
}

impl WebApiTransport {
	pub fn new(config: &ApiConfig) -> Result<WebApiTransport, TransportError> {
		let client = reqwest::blocking::ClientBuilder::new()
			.timeout(config.timeout)
			.build()?;
		Ok(WebApiTransport {
			client: Some(client),
			base_url: config.base_url.clone(),
			api_key: config.api_key.clone(),
		})
	}
}

impl Transport for WebApiTransport {
	fn send_request(&mut self, req: &LookupRequest) -> Result<Vec<u8>, TransportError> {
		let client = self.client.as_ref().ok_or(TransportError::Closed)?;
		debug!("HTTP Request: POST {}", self.base_url);
		trace!("Request params: {:?}", req.form_params());

		// `form` sets Content-Type: application/x-www-form-urlencoded
		let resp = client
			.post(&self.base_url)
			.header(API_KEY_HEADER, self.api_key.expose_secret())
			.form(&req.form_params())
			.send()?;
		let status = resp.status();
		debug!("Response HTTP status: {}", status);

		let bytes = resp.bytes()?;
		trace!("Response body: {:?}", bytes);
		if !status.is_success() {
			return Err(TransportError::HttpStatus {
				status,
				body: String::from_utf8_lossy(&bytes).into_owned(),
			});
		}

		Ok(bytes.to_vec())
	}

	fn close(&mut self) {
		if self.client.take().is_some() {
			debug!("Closed HTTP client for {}", self.base_url);
		}
	}
}
