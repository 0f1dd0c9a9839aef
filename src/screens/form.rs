use crate::api::{
    format_rating, ApiError, Category, CategoryPayload, EntityId, EntityKind, Series,
    SeriesPayload,
};
use crate::util::{validate_image_url, MAX_FIELD_LENGTH};
use chrono::NaiveDate;
use std::borrow::Cow;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown when no category is selected.
pub const CATEGORY_PLACEHOLDER: &str = "Select a category";

// ============================================================================
// Shared Types
// ============================================================================

/// Create or edit, decided only by whether the route carried an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    pub fn from_id(id: Option<EntityId>) -> Self {
        id.map_or(Self::Create, Self::Edit)
    }

    pub fn id(self) -> Option<EntityId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit(_))
    }

    /// Screen heading, e.g. "New Series" / "Edit Category".
    pub fn heading(self, kind: EntityKind) -> String {
        let noun = match kind {
            EntityKind::Category => "Category",
            EntityKind::Series => "Series",
        };
        match self {
            Self::Create => format!("New {noun}"),
            Self::Edit(_) => format!("Edit {noun}"),
        }
    }

    /// Label of the submit action.
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Update",
        }
    }
}

/// One edit applied to the focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Char(char),
    Backspace,
    Clear,
}

/// A failed form constraint. Blocks submission; no request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please fill in the {0} field.")]
    Required(&'static str),
    #[error("{0} must be a date in YYYY-MM-DD format.")]
    InvalidDate(&'static str),
    #[error("{0} must be a number.")]
    InvalidNumber(&'static str),
    #[error("{0} must be a URL starting with http:// or https://.")]
    InvalidUrl(&'static str),
}

fn apply_input(target: &mut String, input: FieldInput, accepts: impl Fn(char) -> bool) {
    match input {
        FieldInput::Char(c) => {
            if !c.is_control() && accepts(c) && target.len() + c.len_utf8() <= MAX_FIELD_LENGTH {
                target.push(c);
            }
        }
        FieldInput::Backspace => {
            target.pop();
        }
        FieldInput::Clear => target.clear(),
    }
}

fn any_char(_: char) -> bool {
    true
}

fn date_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

fn number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

fn require(value: &str, label: &'static str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required(label))
    } else {
        Ok(())
    }
}

fn check_image_url(value: &str, label: &'static str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_image_url(value)
        .map(|_| ())
        .map_err(|_| FieldError::InvalidUrl(label))
}

/// Parses the release date field (`YYYY-MM-DD`).
pub fn parse_release_date(value: &str) -> Result<NaiveDate, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required("Release date"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FieldError::InvalidDate("Release date"))
}

/// Parses the rating field. Empty input means "no rating" and is sent as
/// `null`, never as an empty string.
pub fn parse_rating(value: &str) -> Result<Option<f64>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(FieldError::InvalidNumber("Rating")),
    }
}

/// Request state shared by both forms.
#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    /// Edit mode: the record fetch is pending.
    pub loading: bool,
    /// A create/update request is in flight.
    pub saving: bool,
    pub error: Option<Cow<'static, str>>,
}

impl FormStatus {
    fn mounting(mode: FormMode) -> Self {
        Self {
            loading: mode.is_edit(),
            saving: false,
            error: None,
        }
    }

    /// Busy forms ignore submit, matching a disabled submit button.
    pub fn is_busy(&self) -> bool {
        self.loading || self.saving
    }

    fn begin_submit<T>(&mut self, validated: Result<T, FieldError>) -> Option<T> {
        if self.is_busy() {
            tracing::debug!("Submit ignored while a request is in flight");
            return None;
        }
        self.error = None;
        match validated {
            Ok(payload) => {
                self.saving = true;
                Some(payload)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Form constraint failed");
                self.error = Some(Cow::Owned(e.to_string()));
                None
            }
        }
    }

    fn save_failed(&mut self, kind: EntityKind, mode: FormMode, error: &ApiError) {
        tracing::warn!(%kind, error = %error, "Failed to save");
        self.saving = false;
        self.error = Some(Cow::Borrowed(kind.save_failed_message(mode.is_edit())));
    }

    fn fetch_failed(&mut self, kind: EntityKind, error: &ApiError) {
        if error.is_not_found() {
            tracing::info!(%kind, "Record to edit no longer exists");
        } else {
            tracing::warn!(%kind, error = %error, "Failed to load record for editing");
        }
        self.loading = false;
        self.error = Some(Cow::Borrowed(kind.fetch_failed_message()));
    }
}

/// Focus order shared by both forms' field enums.
pub trait FieldOrder: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Category Form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
    ImageUrl,
    Submit,
    Cancel,
}

impl FieldOrder for CategoryField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Description,
        Self::ImageUrl,
        Self::Submit,
        Self::Cancel,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::ImageUrl => "Image URL",
            Self::Submit => "Submit",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl CategoryFields {
    fn from_record(category: Category) -> Self {
        Self {
            name: category.name,
            description: category.description.unwrap_or_default(),
            image_url: category.image_url.unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<CategoryPayload, FieldError> {
        require(&self.name, "Name")?;
        check_image_url(&self.image_url, "Image URL")?;
        Ok(CategoryPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CategoryForm {
    pub mode: FormMode,
    pub fields: CategoryFields,
    pub focus: CategoryField,
    pub status: FormStatus,
}

impl CategoryForm {
    pub fn mounting(mode: FormMode) -> Self {
        Self {
            mode,
            fields: CategoryFields::default(),
            focus: CategoryField::Name,
            status: FormStatus::mounting(mode),
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Category, ApiError>) {
        match result {
            Ok(category) => {
                self.status.loading = false;
                self.fields = CategoryFields::from_record(category);
            }
            Err(e) => self.status.fetch_failed(EntityKind::Category, &e),
        }
    }

    pub fn input(&mut self, input: FieldInput) {
        match self.focus {
            CategoryField::Name => apply_input(&mut self.fields.name, input, any_char),
            CategoryField::Description => {
                apply_input(&mut self.fields.description, input, any_char)
            }
            CategoryField::ImageUrl => apply_input(&mut self.fields.image_url, input, any_char),
            CategoryField::Submit | CategoryField::Cancel => {}
        }
    }

    /// Clears the previous error, checks constraints, and returns the payload
    /// to send. `None` means nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<CategoryPayload> {
        let validated = self.fields.validate();
        self.status.begin_submit(validated)
    }

    /// Keeps every field value so the user can correct and resubmit.
    pub fn apply_save_failed(&mut self, error: &ApiError) {
        self.status
            .save_failed(EntityKind::Category, self.mode, error);
    }
}

// ============================================================================
// Series Form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Title,
    Description,
    ReleaseDate,
    Rating,
    Category,
    ImageUrl,
    Submit,
    Cancel,
}

impl FieldOrder for SeriesField {
    const ALL: &'static [Self] = &[
        Self::Title,
        Self::Description,
        Self::ReleaseDate,
        Self::Rating,
        Self::Category,
        Self::ImageUrl,
        Self::Submit,
        Self::Cancel,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::ReleaseDate => "Release date",
            Self::Rating => "Rating",
            Self::Category => "Category",
            Self::ImageUrl => "Image URL",
            Self::Submit => "Submit",
            Self::Cancel => "Cancel",
        }
    }
}

/// Raw field values as typed. Date and rating stay text until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFields {
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub rating: String,
    pub category: Option<EntityId>,
    pub image_url: String,
}

impl SeriesFields {
    fn from_record(series: Series) -> Self {
        Self {
            title: series.title,
            description: series.description.unwrap_or_default(),
            release_date: series.release_date.format(DATE_FORMAT).to_string(),
            rating: series.rating.map(format_rating).unwrap_or_default(),
            category: Some(series.category.id),
            image_url: series.image_url.unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<SeriesPayload, FieldError> {
        require(&self.title, "Title")?;
        let release_date = parse_release_date(&self.release_date)?;
        let rating = parse_rating(&self.rating)?;
        let category = self.category.ok_or(FieldError::Required("Category"))?;
        check_image_url(&self.image_url, "Image URL")?;
        Ok(SeriesPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            release_date,
            rating,
            category,
            image_url: self.image_url.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SeriesForm {
    pub mode: FormMode,
    pub fields: SeriesFields,
    pub focus: SeriesField,
    pub status: FormStatus,
    /// Selector options, fetched on every mount regardless of mode.
    pub categories: Vec<Category>,
    pub categories_loading: bool,
}

impl SeriesForm {
    pub fn mounting(mode: FormMode) -> Self {
        Self {
            mode,
            fields: SeriesFields::default(),
            focus: SeriesField::Title,
            status: FormStatus::mounting(mode),
            categories: Vec::new(),
            categories_loading: true,
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Series, ApiError>) {
        match result {
            Ok(series) => {
                self.status.loading = false;
                self.fields = SeriesFields::from_record(series);
            }
            Err(e) => self.status.fetch_failed(EntityKind::Series, &e),
        }
    }

    pub fn apply_options_loaded(&mut self, result: Result<Vec<Category>, ApiError>) {
        self.categories_loading = false;
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load category options");
                self.status.error = Some(Cow::Borrowed("Could not load categories."));
            }
        }
    }

    pub fn input(&mut self, input: FieldInput) {
        let fields = &mut self.fields;
        match self.focus {
            SeriesField::Title => apply_input(&mut fields.title, input, any_char),
            SeriesField::Description => apply_input(&mut fields.description, input, any_char),
            SeriesField::ReleaseDate => apply_input(&mut fields.release_date, input, date_char),
            SeriesField::Rating => apply_input(&mut fields.rating, input, number_char),
            SeriesField::ImageUrl => apply_input(&mut fields.image_url, input, any_char),
            SeriesField::Category => {
                if matches!(input, FieldInput::Backspace | FieldInput::Clear) {
                    fields.category = None;
                }
            }
            SeriesField::Submit | SeriesField::Cancel => {}
        }
    }

    /// Steps through the placeholder followed by each known category.
    pub fn cycle_category(&mut self, forward: bool) {
        let slots = self.categories.len() + 1;
        let current = self
            .fields
            .category
            .and_then(|id| self.categories.iter().position(|c| c.id == id))
            .map_or(0, |idx| idx + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.fields.category = match next {
            0 => None,
            n => Some(self.categories[n - 1].id),
        };
    }

    /// Text shown in the selector for the current value.
    pub fn category_label(&self) -> Cow<'_, str> {
        match self.fields.category {
            None => Cow::Borrowed(CATEGORY_PLACEHOLDER),
            Some(id) => self
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| Cow::Borrowed(c.name.as_str()))
                .unwrap_or_else(|| Cow::Owned(format!("#{id}"))),
        }
    }

    pub fn begin_submit(&mut self) -> Option<SeriesPayload> {
        let validated = self.fields.validate();
        self.status.begin_submit(validated)
    }

    pub fn apply_save_failed(&mut self, error: &ApiError) {
        self.status.save_failed(EntityKind::Series, self.mode, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CategoryRef;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn type_text(form: &mut SeriesForm, text: &str) {
        for c in text.chars() {
            form.input(FieldInput::Char(c));
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 3,
                name: "Drama".to_string(),
                description: None,
                image_url: None,
            },
            Category {
                id: 5,
                name: "Comedy".to_string(),
                description: None,
                image_url: None,
            },
        ]
    }

    fn filled_series_form() -> SeriesForm {
        let mut form = SeriesForm::mounting(FormMode::Create);
        form.apply_options_loaded(Ok(categories()));
        form.fields = SeriesFields {
            title: "Dark".to_string(),
            description: String::new(),
            release_date: "2017-12-01".to_string(),
            rating: String::new(),
            category: Some(3),
            image_url: String::new(),
        };
        form
    }

    #[test]
    fn test_mode_from_route_id() {
        assert_eq!(FormMode::from_id(None), FormMode::Create);
        assert_eq!(FormMode::from_id(Some(4)), FormMode::Edit(4));
        assert_eq!(FormMode::Edit(4).heading(EntityKind::Series), "Edit Series");
        assert_eq!(FormMode::Create.submit_label(), "Create");
    }

    #[test]
    fn test_create_mode_starts_blank_and_idle() {
        let form = CategoryForm::mounting(FormMode::Create);
        assert_eq!(form.fields, CategoryFields::default());
        assert!(!form.status.loading);
    }

    #[test]
    fn test_edit_mode_starts_loading() {
        let form = CategoryForm::mounting(FormMode::Edit(1));
        assert!(form.status.loading);
        assert!(form.status.is_busy());
    }

    #[test]
    fn test_category_edit_populates_fields_with_empty_for_null() {
        let mut form = CategoryForm::mounting(FormMode::Edit(1));
        form.apply_loaded(Ok(Category {
            id: 1,
            name: "Action".to_string(),
            description: None,
            image_url: Some("https://img.example.com/a.png".to_string()),
        }));
        assert!(!form.status.loading);
        assert_eq!(form.fields.name, "Action");
        assert_eq!(form.fields.description, "");
        assert_eq!(form.fields.image_url, "https://img.example.com/a.png");
    }

    #[test]
    fn test_category_fetch_failure_message() {
        let mut form = CategoryForm::mounting(FormMode::Edit(1));
        form.apply_loaded(Err(ApiError::HttpStatus(404)));
        assert!(!form.status.loading);
        assert_eq!(
            form.status.error.as_deref(),
            Some("Could not load the category.")
        );
    }

    #[test]
    fn test_series_fetch_failure_message_for_missing_and_broken() {
        for error in [ApiError::HttpStatus(404), ApiError::HttpStatus(500)] {
            let missing = error.is_not_found();
            let mut form = SeriesForm::mounting(FormMode::Edit(2));
            form.apply_loaded(Err(error));
            assert!(!form.status.loading, "not_found={missing}");
            assert_eq!(
                form.status.error.as_deref(),
                Some("Could not load the series.")
            );
        }
    }

    #[test]
    fn test_required_name_blocks_submit() {
        let mut form = CategoryForm::mounting(FormMode::Create);
        form.fields.name = "   ".to_string();
        assert_eq!(form.begin_submit(), None);
        assert!(!form.status.saving);
        assert_eq!(
            form.status.error.as_deref(),
            Some("Please fill in the Name field.")
        );
    }

    #[test]
    fn test_category_submit_sends_values_as_entered() {
        let mut form = CategoryForm::mounting(FormMode::Create);
        form.fields.name = "Action".to_string();
        let payload = form.begin_submit().unwrap();
        assert_eq!(
            payload,
            CategoryPayload {
                name: "Action".to_string(),
                description: String::new(),
                image_url: String::new(),
            }
        );
        assert!(form.status.saving);
    }

    #[test]
    fn test_submit_while_saving_is_ignored() {
        let mut form = CategoryForm::mounting(FormMode::Create);
        form.fields.name = "Action".to_string();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_submit_clears_prior_error() {
        let mut form = CategoryForm::mounting(FormMode::Create);
        form.status.error = Some(Cow::Borrowed("old"));
        form.fields.name = "Action".to_string();
        form.begin_submit();
        assert_eq!(form.status.error, None);
    }

    #[test]
    fn test_save_failure_keeps_values() {
        let mut form = CategoryForm::mounting(FormMode::Edit(2));
        form.apply_loaded(Ok(Category {
            id: 2,
            name: "Drama".to_string(),
            description: Some("Tears".to_string()),
            image_url: None,
        }));
        form.begin_submit().unwrap();
        form.apply_save_failed(&ApiError::HttpStatus(400));
        assert!(!form.status.saving);
        assert_eq!(form.fields.description, "Tears");
        assert_eq!(
            form.status.error.as_deref(),
            Some("Could not update the category. Check the data.")
        );
    }

    #[test]
    fn test_invalid_image_url_blocks_submit() {
        let mut form = CategoryForm::mounting(FormMode::Create);
        form.fields.name = "Action".to_string();
        form.fields.image_url = "not a url".to_string();
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(CategoryField::Cancel.next(), CategoryField::Name);
        assert_eq!(CategoryField::Name.prev(), CategoryField::Cancel);
        assert_eq!(SeriesField::Rating.next(), SeriesField::Category);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut form = SeriesForm::mounting(FormMode::Create);
        type_text(&mut form, "Dark");
        form.input(FieldInput::Backspace);
        assert_eq!(form.fields.title, "Dar");
        form.focus = SeriesField::ReleaseDate;
        type_text(&mut form, "2017-1x2-01");
        assert_eq!(form.fields.release_date, "2017-12-01");
        form.focus = SeriesField::Submit;
        type_text(&mut form, "ignored");
        assert_eq!(form.fields.title, "Dar");
    }

    #[test]
    fn test_series_edit_populates_normalized_category() {
        let mut form = SeriesForm::mounting(FormMode::Edit(7));
        form.apply_loaded(Ok(Series {
            id: 7,
            title: "Dark".to_string(),
            description: None,
            release_date: NaiveDate::from_ymd_opt(2017, 12, 1).unwrap(),
            rating: Some(8.5),
            category: CategoryRef {
                id: 3,
                name: Some("Drama".to_string()),
            },
            image_url: None,
        }));
        assert_eq!(form.fields.release_date, "2017-12-01");
        assert_eq!(form.fields.rating, "8.5");
        assert_eq!(form.fields.category, Some(3));
        assert_eq!(form.fields.description, "");
    }

    #[test]
    fn test_series_submit_empty_rating_is_null() {
        let mut form = filled_series_form();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.rating, None);
        assert_eq!(payload.category, 3);
        assert_eq!(
            payload.release_date,
            NaiveDate::from_ymd_opt(2017, 12, 1).unwrap()
        );
    }

    #[test]
    fn test_series_required_fields() {
        let mut form = filled_series_form();
        form.fields.category = None;
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.status.error.as_deref(),
            Some("Please fill in the Category field.")
        );

        let mut form = filled_series_form();
        form.fields.release_date.clear();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.status.error.as_deref(),
            Some("Please fill in the Release date field.")
        );
    }

    #[test]
    fn test_series_invalid_date_and_rating() {
        let mut form = filled_series_form();
        form.fields.release_date = "2017-13-40".to_string();
        assert!(form.begin_submit().is_none());

        let mut form = filled_series_form();
        form.fields.rating = "8..5".to_string();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.status.error.as_deref(),
            Some("Rating must be a number.")
        );
    }

    #[test]
    fn test_options_failure_message() {
        let mut form = SeriesForm::mounting(FormMode::Create);
        form.apply_options_loaded(Err(ApiError::HttpStatus(500)));
        assert!(!form.categories_loading);
        assert_eq!(
            form.status.error.as_deref(),
            Some("Could not load categories.")
        );
    }

    #[test]
    fn test_cycle_category_includes_placeholder() {
        let mut form = SeriesForm::mounting(FormMode::Create);
        form.apply_options_loaded(Ok(categories()));
        assert_eq!(form.category_label(), CATEGORY_PLACEHOLDER);
        form.cycle_category(true);
        assert_eq!(form.fields.category, Some(3));
        form.cycle_category(true);
        assert_eq!(form.category_label(), "Comedy");
        form.cycle_category(true);
        assert_eq!(form.fields.category, None);
        form.cycle_category(false);
        assert_eq!(form.fields.category, Some(5));
    }

    #[test]
    fn test_unknown_category_label_falls_back_to_id() {
        let mut form = SeriesForm::mounting(FormMode::Edit(1));
        form.fields.category = Some(42);
        assert_eq!(form.category_label(), "#42");
    }

    #[test]
    fn test_parse_rating_values() {
        assert_eq!(parse_rating(""), Ok(None));
        assert_eq!(parse_rating(" 7 "), Ok(Some(7.0)));
        assert_eq!(parse_rating("8.5"), Ok(Some(8.5)));
        assert!(parse_rating("abc").is_err());
        assert!(parse_rating("inf").is_err());
    }

    proptest! {
        #[test]
        fn parse_rating_accepts_formatted_numbers(n in 0.0f64..10.0) {
            let rounded = (n * 10.0).round() / 10.0;
            prop_assert_eq!(parse_rating(&format_rating(rounded)), Ok(Some(rounded)));
        }

        #[test]
        fn parse_rating_never_panics(s in "\\PC{0,12}") {
            let _ = parse_rating(&s);
        }
    }
}
