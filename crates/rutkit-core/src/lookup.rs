//! Person lookup by identifier: the endpoint contract, result banners,
//! input debouncing and response sequencing.
//!
//! This module never performs I/O. Callers implement [`LookupClient`] over
//! whatever transport they have; everything else here is pure state.
//!
//! Responses can arrive out of order. [`LookupSequencer`] hands out a ticket
//! per request and only the newest ticket's response is applied, so a slow
//! early request cannot overwrite the result of a later one.
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default endpoint path for the lookup request.
pub const DEFAULT_LOOKUP_PATH: &str = "/api/persona/buscar/";

/// Default quiet period after the last keystroke before a lookup fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Message shown while a request is in flight.
pub const SEARCHING_MESSAGE: &str = "searching...";

/// Message shown for any transport or HTTP failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "connection error while looking up the identifier";

/// Message shown when the server says "not found" without its own message.
pub const NOT_FOUND_MESSAGE: &str = "no person is registered with this identifier";

/// Hint appended to every not-found banner.
pub const REGISTER_FIRST_HINT: &str = "register the person's basic data before continuing";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Where and how eagerly to look identifiers up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Endpoint path, without query string.
    pub path: String,
    /// Quiet period for input-triggered lookups.
    pub debounce: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_LOOKUP_PATH.to_owned(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Builds the request URL `<path>?id=<urlencoded identifier>`.
///
/// Surrounding whitespace is trimmed; the identifier is otherwise sent as
/// typed.
///
/// ```
/// use rutkit_core::lookup::{LookupConfig, lookup_url};
///
/// let url = lookup_url(&LookupConfig::default(), " 12.345.678-5 ");
/// assert_eq!(url, "/api/persona/buscar/?id=12.345.678-5");
/// ```
pub fn lookup_url(config: &LookupConfig, raw: &str) -> String {
    format!("{}?id={}", config.path, urlencoding::encode(raw.trim()))
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A registered person as returned by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Full display name.
    pub full_name: String,
    /// Sex as recorded.
    pub sex: String,
    /// Birth date as recorded (opaque string).
    pub birth_date: String,
    /// Phone number, if registered.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address, if registered.
    #[serde(default)]
    pub email: Option<String>,
    /// The identifier the record is stored under.
    pub identifier: String,
}

/// Body of a lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Whether a person matched.
    pub found: bool,
    /// Server explanation, present when `found` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The matched person, present when `found` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<PersonRecord>,
}

impl LookupResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Malformed`] if `body` is not the expected JSON
    /// shape.
    pub fn from_json(body: &str) -> Result<Self, LookupError> {
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

/// Why a lookup produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The server answered with a non-2xx status.
    #[error("lookup failed with HTTP status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },
    /// The request never completed.
    #[error("lookup transport failure: {0}")]
    Transport(String),
    /// The body could not be decoded.
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// Performs a lookup request. Implementations own the transport.
pub trait LookupClient {
    /// Fetches `url` and decodes the response.
    ///
    /// # Errors
    ///
    /// Any [`LookupError`]; the caller turns every variant into the same
    /// connection-error banner.
    fn fetch(&self, url: &str) -> Result<LookupResponse, LookupError>;
}

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

/// Visual tone of the lookup result region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Request in flight.
    Info,
    /// Person found.
    Success,
    /// Person not found.
    Warning,
    /// Lookup failed.
    Danger,
}

impl Tone {
    /// Returns `true` for tones that must stop a form from being submitted.
    pub fn blocks_submit(self) -> bool {
        match self {
            Self::Warning | Self::Danger => true,
            Self::Info | Self::Success => false,
        }
    }
}

/// What the lookup result region next to a field currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupBanner {
    /// Visual tone.
    pub tone: Tone,
    /// Text content, possibly multi-line.
    pub message: String,
}

impl LookupBanner {
    /// The banner shown while a request is in flight.
    pub fn searching() -> Self {
        Self {
            tone: Tone::Info,
            message: SEARCHING_MESSAGE.to_owned(),
        }
    }

    /// The banner shown for any failed request.
    pub fn connection_error() -> Self {
        Self {
            tone: Tone::Danger,
            message: CONNECTION_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Builds the banner for a decoded response.
    ///
    /// A response that claims `found` but carries no record is treated as a
    /// failed request.
    pub fn from_response(response: &LookupResponse) -> Self {
        match (response.found, &response.record) {
            (true, Some(record)) => Self {
                tone: Tone::Success,
                message: describe_person(record),
            },
            (true, None) => Self::connection_error(),
            (false, _) => {
                let reason = response
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(NOT_FOUND_MESSAGE);
                Self {
                    tone: Tone::Warning,
                    message: format!("{reason}\n{REGISTER_FIRST_HINT}"),
                }
            }
        }
    }
}

fn describe_person(record: &PersonRecord) -> String {
    let or_missing = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("not registered")
            .to_owned()
    };
    format!(
        "person found: {}\nsex: {}\nbirth date: {}\nphone: {}\nemail: {}",
        record.full_name,
        record.sex,
        record.birth_date,
        or_missing(&record.phone),
        or_missing(&record.email),
    )
}

/// Runs one lookup for `raw` and returns the banner to display.
///
/// Returns `None` for blank input, meaning the banner should be cleared.
/// Errors never escape: every failure becomes
/// [`LookupBanner::connection_error`].
pub fn perform_lookup<C: LookupClient + ?Sized>(
    client: &C,
    config: &LookupConfig,
    raw: &str,
) -> Option<LookupBanner> {
    if raw.trim().is_empty() {
        return None;
    }
    let url = lookup_url(config, raw);
    match client.fetch(&url) {
        Ok(response) => Some(LookupBanner::from_response(&response)),
        Err(err) => {
            tracing::warn!(%url, error = %err, "identifier lookup failed");
            Some(LookupBanner::connection_error())
        }
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Fires once after input has been quiet for the configured delay.
///
/// Every keystroke pushes the deadline back; there is no maximum wait.
/// Time is supplied by the caller so the type is deterministic under test.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Creates an idle debouncer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records a keystroke at `now`, restarting the quiet period.
    pub fn keystroke(&mut self, now: Instant) {
        // A delay past the clock's range never fires.
        self.deadline = now.checked_add(self.delay);
    }

    /// Returns `true` exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            Some(_) | None => false,
        }
    }

    /// Drops any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// ---------------------------------------------------------------------------
// Sequencing
// ---------------------------------------------------------------------------

/// Identifies one issued lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The ticket's sequence number; later requests have larger numbers.
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Orders lookup requests so only the newest response is applied.
#[derive(Debug, Clone, Default)]
pub struct LookupSequencer {
    issued: u64,
}

impl LookupSequencer {
    /// Creates a sequencer with no requests issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Supersedes every outstanding request without starting a new one.
    ///
    /// Used when the input is cleared.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }

    /// Returns `true` if `ticket` belongs to the newest request.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Returns `result` if `ticket` is still current, otherwise discards it.
    pub fn settle<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale lookup response"
            );
            None
        }
    }
}
