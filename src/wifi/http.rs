use esp_idf_svc::http::{
    client::{Configuration, EspHttpConnection},
    Method,
};

#[derive(Debug)]
pub enum HttpError {
    InitializationError,
    ListeningError,
    ReadError,
    RequestError,
    TimeoutError,
}

/// The Http trait gives the implementation on how to send a request and wait
/// for its response
pub trait Http {
    fn new() -> Result<Self, HttpError>
    where
        Self: Sized;

    /// Returns the EspHttpConnection
    fn get_connection(&mut self) -> &mut EspHttpConnection;

    /// Checks whether the "Content-Length" header is in the headers section, if not it adds it to them.
    ///
    /// # Arguments
    ///
    /// - `headers`: The mutable reference to a vector of headers the user added to the HTTP request.
    /// - `body_len`: An option `usize` that may contain the length of the request body if the user set one.
    fn add_body_len_header(&self, headers: &mut Vec<HttpHeader>, body_len: Option<usize>) {
        if let Some(body_len) = body_len {
            let has_content_length = headers
                .iter()
                .any(|header| header.header_type == HttpHeaderType::ContentLength);

            if !has_content_length {
                let content_length_header =
                    HttpHeader::new(HttpHeaderType::ContentLength, body_len.to_string());
                headers.push(content_length_header);
            }
        }
    }

    /// Sends an HTTP request to a specified URI with the given method, headers, and optional body.
    ///
    /// # Parameters
    /// - `method`: The HTTP method to use for the request (e.g., GET, POST).
    /// - `uri`: A string slice that represents the URI to which the request will be sent.
    /// - `headers`: A vector of HTTP headers to include with the request.
    /// - `body`: An optional `String` containing the body of the request. If `None`, no body is sent.
    ///
    /// # Returns
    /// Returns a `Result<(), HttpError>`. On success, it returns `Ok(())`, HttpError otherwise.
    ///
    /// # Errors
    /// - `HttpError::RequestError`: If an error occurs while creating or sending the request.
    fn send_request(
        &mut self,
        method: Method,
        uri: &str,
        mut headers: Vec<HttpHeader>,
        body: Option<String>,
    ) -> Result<(), HttpError> {
        self.add_body_len_header(&mut headers, body.as_ref().map(|body| body.len()));

        let temp: Vec<(&str, &str)> = headers
            .iter()
            .map(|header| (header.header_type.as_str(), header.value.as_str()))
            .collect();
        let connection = self.get_connection();
        connection
            .initiate_request(method, uri, &temp)
            .map_err(|_| HttpError::RequestError)?;
        if let Some(body_content) = body {
            connection
                .write_all(body_content.as_bytes())
                .map_err(|_| HttpError::RequestError)?;
        }
        Ok(())
    }

    /// Does an HTTP POST on the desired uri with the designated headers
    ///
    /// # Arguments
    ///
    /// - `uri`: A string slice that holds the Uniform Resource Identifier (URI) of the target resource where the HTTP POST request will be sent.
    /// - `headers`: A vector of HttpHeader structs containing the headers to be included in the POST request.
    /// - `body`: An optional `String` containing the body of the request. If `None`, no body is sent.
    ///
    /// # Returns
    ///
    /// A `Result` with Ok if the POST operation completed successfully, or an `HttpError` if it fails.
    ///
    /// # Errors
    ///
    /// - `HttpError::RequestError`: If the request fails.
    fn post<'a>(
        &mut self,
        uri: &'a str,
        headers: Vec<HttpHeader<'a>>,
        body: Option<String>,
    ) -> Result<(), HttpError> {
        self.send_request(Method::Post, uri, headers, body)
    }

    /// Gets the response status code of the last done request
    ///
    /// # Returns
    ///
    /// An u16 that represents the status code
    ///
    /// # Panics
    ///
    /// If connection is not in response phase
    fn response_status(&mut self) -> u16 {
        self.get_connection().status()
    }

    /// Blocking wait of the request response
    ///
    /// # Arguments
    ///
    /// - `buffer`: A slice of bytes used to store the response
    ///
    /// # Returns
    ///
    /// A Result. An Ok with an usize representing the bytes read if operation was succesful.
    /// Otherwise an `HttpError` if it fails.
    ///
    /// # Errors
    ///
    /// - `HttpError::ListeningError`: If initiating the response phase fails.
    /// - `HttpError::TimeoutError`: If there is a timeout waiting for the response.
    /// - `HttpError::ReadError`: If the reading operation fails.
    fn wait_for_response(&mut self, buffer: &mut [u8]) -> Result<usize, HttpError> {
        self.get_connection()
            .initiate_response()
            .map_err(|_| HttpError::ListeningError)?;
        self.get_connection()
            .read(buffer)
            .map_err(|err| match err.code() {
                -0x7007 => HttpError::TimeoutError,
                _ => HttpError::ReadError,
            })
    }
}

/// Abstraction to simply make HTTP request as a client
pub struct HttpClient {
    connection: EspHttpConnection,
}

impl Http for HttpClient {
    /// Creates a new HttpClient
    ///
    /// # Errors
    ///
    /// - `HttpError::InitializationError`: If the creation of the Http connection fails
    fn new() -> Result<Self, HttpError> {
        let config: &Configuration = &Default::default();
        let connection =
            EspHttpConnection::new(config).map_err(|_| HttpError::InitializationError)?;
        Ok(HttpClient { connection })
    }

    fn get_connection(&mut self) -> &mut EspHttpConnection {
        &mut self.connection
    }
}

/// Abstraction to simply make HTTPS request as a client
pub struct HttpsClient {
    connection: EspHttpConnection,
}

impl Http for HttpsClient {
    /// Creates a new HttpsClient, backed by the global CA store and the
    /// bundled certificates
    ///
    /// # Errors
    ///
    /// - `HttpError::InitializationError`: If the creation of the Http connection fails
    fn new() -> Result<Self, HttpError>
    where
        Self: Sized,
    {
        let config: &Configuration = &Configuration {
            use_global_ca_store: true,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let connection =
            EspHttpConnection::new(config).map_err(|_| HttpError::InitializationError)?;
        Ok(HttpsClient { connection })
    }

    fn get_connection(&mut self) -> &mut EspHttpConnection {
        &mut self.connection
    }
}

/// Simple abstraction of a header used for HTTP/HTTPS requests. It contains:
/// - `header_type`: The type of header to be used
/// - `value`: The value associated to the header
#[derive(Debug)]
pub struct HttpHeader<'a> {
    header_type: HttpHeaderType<'a>,
    value: String,
}

impl<'a> HttpHeader<'a> {
    /// Creates a new HttpHeader
    ///
    /// # Arguments
    ///
    /// - `header_type`: The type of header to be used
    /// - `value`: The value associated to the header
    ///
    /// # Returns
    ///
    /// The new HttpHeader instance
    pub fn new(header_type: HttpHeaderType<'a>, value: String) -> Self {
        HttpHeader { header_type, value }
    }
}

/// The HTTP/HTTPS headers this crate sends
#[derive(Debug, PartialEq, Eq)]
pub enum HttpHeaderType<'a> {
    Accept,
    Authorization,
    ContentLength,
    ContentType,
    Custom(&'a str),
    UserAgent,
}

impl<'a> HttpHeaderType<'a> {
    /// Creates the &str for the enum instance
    ///
    /// # Returns
    ///
    /// An &str of the header type
    fn as_str(&self) -> &'a str {
        match self {
            HttpHeaderType::Accept => "Accept",
            HttpHeaderType::Authorization => "Authorization",
            HttpHeaderType::ContentLength => "Content-Length",
            HttpHeaderType::ContentType => "Content-Type",
            HttpHeaderType::UserAgent => "User-Agent",
            HttpHeaderType::Custom(h_type) => h_type,
        }
    }
}
