//! Wiring the codec into text fields without depending on a UI toolkit.
//!
//! The binder talks to the host UI only through small capability traits:
//! [`TextField`], [`ErrorSink`], [`SubmitEvent`] and [`SplitFields`]. A
//! [`BoundField`] owns one field together with everything attached to it
//! (error sink, enabled behaviors, visual status, last lookup banner). The
//! host delivers events with [`FormBinder::dispatch`] and
//! [`FormBinder::submit`]; only behaviors that were attached react.
//!
//! Visual status follows this state machine; no state is terminal:
//!
//! ```text
//! Empty   --blur, empty value-->  Empty
//! Empty   --input-->              Dirty
//! Dirty   --blur, invalid-->      Invalid
//! Dirty   --blur, valid-->        Valid
//! Invalid --input-->              Dirty
//! Valid   --input-->              Dirty
//! ```
use std::fmt;

use crate::codec::{CHECK_SEPARATOR, GROUP_SEPARATOR, IdentityNumberCodec, is_blank, is_space};
use crate::lookup::{
    LookupBanner, LookupClient, LookupConfig, LookupError, LookupResponse, LookupSequencer,
    RequestTicket, lookup_url,
};

/// Written to the error sink when blur validation fails.
pub const INVALID_FIELD_MESSAGE: &str = "invalid identifier, expected format like 12345678-9";

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A single-line text input.
///
/// Caret positions are counted in `char`s.
pub trait TextField {
    /// Current text.
    fn value(&self) -> String;
    /// Replaces the text. Must not emit an input notification.
    fn set_value(&mut self, value: &str);
    /// Current caret position.
    fn caret(&self) -> usize;
    /// Moves the caret.
    fn set_caret(&mut self, position: usize);
    /// Gives the field keyboard focus.
    fn focus(&mut self);
    /// Applies the visual state for `status`.
    fn set_status(&mut self, status: FieldStatus);
}

/// Region that displays a field's validation message.
pub trait ErrorSink {
    /// Shows `message`.
    fn show(&mut self, message: &str);
    /// Hides any message.
    fn clear(&mut self);
}

/// An error sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn show(&mut self, _message: &str) {}
    fn clear(&mut self) {}
}

/// Targets that mirror the body and check character of the identifier
/// being typed, for forms that submit them separately.
///
/// Implemented for any pair of [`TextField`]s `(body, check)`.
pub trait SplitFields {
    /// Writes the current halves. Both are empty while the identifier is
    /// too short to split.
    fn show_parts(&mut self, body: &str, check: &str);
}

impl<B: TextField, C: TextField> SplitFields for (B, C) {
    fn show_parts(&mut self, body: &str, check: &str) {
        self.0.set_value(body);
        self.1.set_value(check);
    }
}

/// A pending form submission.
pub trait SubmitEvent {
    /// Cancels the submission.
    fn prevent_default(&mut self);
    /// Tells the user why the submission was cancelled.
    fn notify(&mut self, message: &str);
}

// ---------------------------------------------------------------------------
// Status, events and outcomes
// ---------------------------------------------------------------------------

/// Visual status of a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldStatus {
    /// Nothing typed yet.
    #[default]
    Empty,
    /// Edited since the last validation.
    Dirty,
    /// Failed validation.
    Invalid,
    /// Passed validation.
    Valid,
}

/// A notification from the host UI for a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The text changed.
    Input,
    /// The field lost focus.
    Blur,
}

/// Why a submission was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    /// The field is empty.
    Required,
    /// The field does not hold a valid identifier.
    InvalidFormat,
    /// The last lookup did not confirm a registered person.
    Unconfirmed,
}

impl SubmitBlock {
    /// The message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "identifier is required",
            Self::InvalidFormat => "invalid identifier format",
            Self::Unconfirmed => "must search and confirm a valid match before continuing",
        }
    }
}

/// Result of [`FormBinder::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission may proceed.
    Allowed,
    /// The submission was cancelled.
    Blocked(SubmitBlock),
}

impl SubmitOutcome {
    /// Returns `true` if the submission may proceed.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

// ---------------------------------------------------------------------------
// BoundField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Attachments {
    auto_format: bool,
    blur_validation: bool,
    submit_guard: bool,
}

/// A text field together with the behaviors attached to it.
pub struct BoundField<F, S = NullSink> {
    field: F,
    error_sink: Option<S>,
    split_fields: Option<Box<dyn SplitFields>>,
    attached: Attachments,
    status: FieldStatus,
    banner: Option<LookupBanner>,
}

impl<F: fmt::Debug, S: fmt::Debug> fmt::Debug for BoundField<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundField")
            .field("field", &self.field)
            .field("error_sink", &self.error_sink)
            .field("split_fields", &self.split_fields.is_some())
            .field("attached", &self.attached)
            .field("status", &self.status)
            .field("banner", &self.banner)
            .finish()
    }
}

impl<F: TextField, S: ErrorSink> BoundField<F, S> {
    /// Wraps `field` with nothing attached.
    pub fn new(field: F) -> Self {
        Self {
            field,
            error_sink: None,
            split_fields: None,
            attached: Attachments::default(),
            status: FieldStatus::Empty,
            banner: None,
        }
    }

    /// The wrapped field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable access to the wrapped field, for the host to apply edits.
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// The attached error sink, if any.
    pub fn error_sink(&self) -> Option<&S> {
        self.error_sink.as_ref()
    }

    /// Current visual status.
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// What the lookup region currently shows; `None` when hidden.
    pub fn banner(&self) -> Option<&LookupBanner> {
        self.banner.as_ref()
    }

    /// Replaces the lookup region content.
    pub fn set_banner(&mut self, banner: Option<LookupBanner>) {
        self.banner = banner;
    }

    /// Consumes the binding and returns the field and error sink.
    pub fn into_parts(self) -> (F, Option<S>) {
        (self.field, self.error_sink)
    }

    fn transition(&mut self, next: FieldStatus) {
        if self.status != next {
            tracing::debug!(from = ?self.status, to = ?next, "identifier field status changed");
        }
        self.status = next;
        self.field.set_status(next);
    }

    fn show_error(&mut self, message: &str) {
        if let Some(sink) = self.error_sink.as_mut() {
            sink.show(message);
        }
    }

    fn clear_error(&mut self) {
        if let Some(sink) = self.error_sink.as_mut() {
            sink.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// FormBinder
// ---------------------------------------------------------------------------

/// Attaches codec behavior to bound fields and routes their events.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBinder {
    codec: IdentityNumberCodec,
}

impl FormBinder {
    /// Creates a binder that uses `codec`.
    pub fn new(codec: IdentityNumberCodec) -> Self {
        Self { codec }
    }

    /// The codec this binder applies.
    pub fn codec(&self) -> &IdentityNumberCodec {
        &self.codec
    }

    /// Reformats the field on every input, keeping the caret in place.
    pub fn attach_auto_format<F: TextField, S: ErrorSink>(&self, bound: &mut BoundField<F, S>) {
        bound.attached.auto_format = true;
    }

    /// Validates the field when it loses focus and reports to `error_sink`.
    pub fn attach_blur_validation<F: TextField, S: ErrorSink>(
        &self,
        bound: &mut BoundField<F, S>,
        error_sink: S,
    ) {
        bound.error_sink = Some(error_sink);
        bound.attached.blur_validation = true;
    }

    /// Mirrors the split body and check character into `targets` on every
    /// input, after any auto-format pass.
    pub fn attach_split_fields<F, S, T>(&self, bound: &mut BoundField<F, S>, targets: T)
    where
        F: TextField,
        S: ErrorSink,
        T: SplitFields + 'static,
    {
        bound.split_fields = Some(Box::new(targets));
    }

    /// Blocks submission of the enclosing form while the field is empty,
    /// invalid, or showing an unconfirmed lookup.
    pub fn attach_submit_guard<F: TextField, S: ErrorSink>(&self, bound: &mut BoundField<F, S>) {
        bound.attached.submit_guard = true;
    }

    /// Delivers a field notification.
    pub fn dispatch<F: TextField, S: ErrorSink>(
        &self,
        bound: &mut BoundField<F, S>,
        event: FieldEvent,
    ) {
        match event {
            FieldEvent::Input => self.on_input(bound),
            FieldEvent::Blur => self.on_blur(bound),
        }
    }

    fn on_input<F: TextField, S: ErrorSink>(&self, bound: &mut BoundField<F, S>) {
        if bound.attached.auto_format {
            self.reformat(&mut bound.field);
        }
        if let Some(targets) = bound.split_fields.as_mut() {
            let parts = self.codec.split(&bound.field.value());
            targets.show_parts(&parts.body, &parts.check);
        }
        bound.transition(FieldStatus::Dirty);
    }

    fn on_blur<F: TextField, S: ErrorSink>(&self, bound: &mut BoundField<F, S>) {
        if !bound.attached.blur_validation {
            return;
        }
        let value = bound.field.value();
        if bound.status == FieldStatus::Empty && is_blank(&value) {
            bound.clear_error();
            bound.transition(FieldStatus::Empty);
            return;
        }
        if self.codec.is_valid(&value) {
            bound.clear_error();
            bound.transition(FieldStatus::Valid);
        } else {
            bound.show_error(INVALID_FIELD_MESSAGE);
            bound.transition(FieldStatus::Invalid);
        }
    }

    /// One formatting pass. `format` is idempotent, so writing the result
    /// back cannot call for another pass.
    fn reformat<F: TextField>(&self, field: &mut F) {
        let before = field.value();
        let formatted = self.codec.format(&before);
        if formatted == before {
            return;
        }
        let caret = field.caret();
        let before_len = before.chars().count();
        let after_len = formatted.chars().count();
        let new_caret = if after_len > before_len {
            caret_after_growth(&before, caret, &formatted)
        } else {
            caret.min(after_len)
        };
        field.set_value(&formatted);
        field.set_caret(new_caret);
    }

    /// Runs the submit guard, if attached.
    ///
    /// When blocked, the event's default action is prevented, the field is
    /// focused and the user is notified.
    pub fn submit<F: TextField, S: ErrorSink, E: SubmitEvent>(
        &self,
        bound: &mut BoundField<F, S>,
        event: &mut E,
    ) -> SubmitOutcome {
        if !bound.attached.submit_guard {
            return SubmitOutcome::Allowed;
        }
        let value = bound.field.value();
        let block = if is_blank(&value) {
            Some(SubmitBlock::Required)
        } else if !self.codec.is_valid(&value) {
            bound.show_error(INVALID_FIELD_MESSAGE);
            bound.transition(FieldStatus::Invalid);
            Some(SubmitBlock::InvalidFormat)
        } else if bound.banner.as_ref().is_some_and(|b| b.tone.blocks_submit()) {
            Some(SubmitBlock::Unconfirmed)
        } else {
            None
        };

        match block {
            Some(block) => {
                tracing::debug!(reason = ?block, "submission blocked");
                event.prevent_default();
                bound.field.focus();
                event.notify(block.message());
                SubmitOutcome::Blocked(block)
            }
            None => SubmitOutcome::Allowed,
        }
    }

    /// Starts a lookup for the field's current value.
    ///
    /// Shows the searching banner and returns the ticket and request URL. A
    /// blank value hides the banner, supersedes any request in flight and
    /// returns `None`.
    pub fn begin_lookup<F: TextField, S: ErrorSink>(
        &self,
        bound: &mut BoundField<F, S>,
        config: &LookupConfig,
        sequencer: &mut LookupSequencer,
    ) -> Option<(RequestTicket, String)> {
        let value = bound.field.value();
        if is_blank(&value) {
            sequencer.invalidate();
            bound.banner = None;
            return None;
        }
        bound.banner = Some(LookupBanner::searching());
        Some((sequencer.begin(), lookup_url(config, &value)))
    }

    /// Applies a finished lookup if its ticket is still the newest.
    ///
    /// Returns `false` when the response was stale and discarded.
    pub fn finish_lookup<F: TextField, S: ErrorSink>(
        &self,
        bound: &mut BoundField<F, S>,
        sequencer: &LookupSequencer,
        ticket: RequestTicket,
        result: Result<LookupResponse, LookupError>,
    ) -> bool {
        let Some(result) = sequencer.settle(ticket, result) else {
            return false;
        };
        let banner = match result {
            Ok(response) => LookupBanner::from_response(&response),
            Err(err) => {
                tracing::warn!(error = %err, "identifier lookup failed");
                LookupBanner::connection_error()
            }
        };
        bound.banner = Some(banner);
        true
    }

    /// Runs a complete lookup synchronously through `client`.
    pub fn run_lookup<F, S, C>(
        &self,
        bound: &mut BoundField<F, S>,
        client: &C,
        config: &LookupConfig,
        sequencer: &mut LookupSequencer,
    ) where
        F: TextField,
        S: ErrorSink,
        C: LookupClient + ?Sized,
    {
        if let Some((ticket, url)) = self.begin_lookup(bound, config, sequencer) {
            let result = client.fetch(&url);
            self.finish_lookup(bound, sequencer, ticket, result);
        }
    }
}

fn is_separator(c: char) -> bool {
    c == GROUP_SEPARATOR || c == CHECK_SEPARATOR || is_space(c)
}

/// Maps a caret in `before` to the same logical spot in the longer
/// `after`: just past the same number of non-separator characters.
fn caret_after_growth(before: &str, caret: usize, after: &str) -> usize {
    let significant = before
        .chars()
        .take(caret)
        .filter(|c| !is_separator(*c))
        .count();
    if significant == 0 {
        return 0;
    }
    let mut seen = 0;
    for (pos, c) in after.chars().enumerate() {
        if !is_separator(c) {
            seen += 1;
            if seen == significant {
                return pos + 1;
            }
        }
    }
    after.chars().count()
}
