// crates/contact-book-core/src/runtime/view.rs
// ============================================================================
// Module: View Selector
// Description: Chooses full page, row fragment, or form re-render per request.
// Purpose: Keep the fragment-vs-page decision explicit and client-agnostic.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A list request is answered with a row fragment only when it carries a
//! fragment signal: the [`FRAGMENT_TRIGGER_HEADER`] value equals one of the
//! known trigger ids exactly. Anything else, including a missing header,
//! yields a full page.
//!
//! Pagination uses infinite accumulation. Every list response holds the
//! disjoint window for the requested page and, while later pages exist, a
//! trailing load-more row that requests the next page with the same term.
//! The client replaces that row with the returned fragment.
//!
//! Only full pages render the page shell, so only full pages drain notices.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContactFields;
use crate::core::ContactId;
use crate::core::ContactRecord;
use crate::core::FieldErrors;
use crate::core::InvalidContact;
use crate::core::SearchPage;
use crate::core::SearchTerm;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request header naming the element that triggered an incremental request.
pub const FRAGMENT_TRIGGER_HEADER: &str = "HX-Trigger";

/// Element id of the live search input.
pub const SEARCH_TRIGGER_ID: &str = "search";

/// Element id of the trailing load-more row.
pub const LOAD_MORE_TRIGGER_ID: &str = "load-more";

/// Trigger ids that request a row fragment.
pub const FRAGMENT_TRIGGER_IDS: [&str; 2] = [SEARCH_TRIGGER_ID, LOAD_MORE_TRIGGER_ID];

// ============================================================================
// SECTION: Fragment Signal
// ============================================================================

/// Whether a request came from an incremental UI trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSignal {
    /// Incremental trigger; answer with rows only.
    Fragment,
    /// Ordinary navigation; answer with the full page.
    FullNavigation,
}

impl FragmentSignal {
    /// Classifies a raw trigger header value.
    #[must_use]
    pub fn from_trigger(trigger: Option<&str>) -> Self {
        match trigger {
            Some(value) if FRAGMENT_TRIGGER_IDS.contains(&value) => Self::Fragment,
            _ => Self::FullNavigation,
        }
    }
}

// ============================================================================
// SECTION: List View
// ============================================================================

/// The response shape chosen for a list or search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Complete listing page with search box, rows, and load-more control.
    FullPage {
        /// Active search term, if any.
        search: Option<String>,
        /// Window of rows for the requested page.
        page: SearchPage,
    },
    /// Rows only, spliced into an existing table.
    RowFragment {
        /// Active search term, if any.
        search: Option<String>,
        /// Window of rows for the requested page.
        page: SearchPage,
    },
}

impl ListView {
    /// Returns the window of rows.
    #[must_use]
    pub const fn page(&self) -> &SearchPage {
        match self {
            Self::FullPage {
                page, ..
            }
            | Self::RowFragment {
                page, ..
            } => page,
        }
    }

    /// Returns the active search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        match self {
            Self::FullPage {
                search, ..
            }
            | Self::RowFragment {
                search, ..
            } => search.as_deref(),
        }
    }

    /// Returns the page the load-more row should request, if any.
    #[must_use]
    pub fn load_more_page(&self) -> Option<u32> {
        self.page().next_page()
    }

    /// Returns true when rendering this view must drain the notice queue.
    #[must_use]
    pub const fn drains_notices(&self) -> bool {
        matches!(self, Self::FullPage { .. })
    }

    /// Returns a stable label for audit records.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::FullPage { .. } => "full_page",
            Self::RowFragment { .. } => "row_fragment",
        }
    }
}

/// Chooses the list response shape.
#[must_use]
pub fn select_list_view(
    signal: FragmentSignal,
    raw_term: Option<&str>,
    page: SearchPage,
) -> ListView {
    let search = raw_term.and_then(SearchTerm::parse).map(|term| term.as_str().to_string());
    match signal {
        FragmentSignal::Fragment => ListView::RowFragment {
            search,
            page,
        },
        FragmentSignal::FullNavigation => ListView::FullPage {
            search,
            page,
        },
    }
}

// ============================================================================
// SECTION: Form View
// ============================================================================

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New contact form.
    Create,
    /// Edit form for an existing contact.
    Edit(ContactId),
}

impl FormMode {
    /// Returns the path the form posts to.
    #[must_use]
    pub fn action(self) -> String {
        match self {
            Self::Create => "/contacts/new".to_string(),
            Self::Edit(id) => format!("/contacts/{id}/edit"),
        }
    }
}

/// Create or edit form, pre-filled and optionally carrying field errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Form mode.
    pub mode: FormMode,
    /// Values shown in the inputs.
    pub values: ContactFields,
    /// Per-field messages; all empty on first render.
    pub errors: FieldErrors,
}

impl FormView {
    /// Blank create form.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Create,
            values: ContactFields::default(),
            errors: FieldErrors::default(),
        }
    }

    /// Edit form pre-filled from a stored record.
    #[must_use]
    pub fn for_record(record: &ContactRecord) -> Self {
        Self {
            mode: FormMode::Edit(record.id),
            values: record.fields(),
            errors: FieldErrors::default(),
        }
    }

    /// Re-render of a rejected submission with the submitted values.
    #[must_use]
    pub fn with_errors(mode: FormMode, rejected: InvalidContact) -> Self {
        Self {
            mode,
            values: rejected.values,
            errors: rejected.errors,
        }
    }

    /// Returns true when any field carries a message.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
