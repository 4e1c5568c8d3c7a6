// crates/pagecraft-render/src/forms.rs
use pagecraft_core::Component;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const DEFAULT_FORM_ACTION: &str = "/api/forms/submit";
pub const DEFAULT_FORM_METHOD: &str = "POST";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to submit form. Please try again.";

/// Submission settings of a `form-container`, defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub action: String,
    pub method: String,
    pub success_message: String,
    pub error_message: String,
}

impl FormSettings {
    pub fn from_component(component: &Component) -> Self {
        let text = |key: &str, fallback: &str| {
            component
                .attribute_str(key)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            action: text("action", DEFAULT_FORM_ACTION),
            method: text("method", DEFAULT_FORM_METHOD),
            success_message: text("successMessage", DEFAULT_SUCCESS_MESSAGE),
            error_message: text("errorMessage", DEFAULT_ERROR_MESSAGE),
        }
    }
}

/// Request handed to the host's HTTP layer. The payload is sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRequest {
    pub method: String,
    pub target: String,
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormResponse {
    pub status: u16,
}

impl FormResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Whatever actually performs the request.
pub trait FormSubmitter {
    fn submit(&mut self, request: &FormRequest) -> anyhow::Result<FormResponse>;
}

/// Message shown above the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn message(&self) -> &str {
        match self {
            SubmitStatus::Success(message) | SubmitStatus::Error(message) => message,
        }
    }

    pub fn alert_class(&self) -> &'static str {
        match self {
            SubmitStatus::Success(_) => "alert alert-success mb-4",
            SubmitStatus::Error(_) => "alert alert-error mb-4",
        }
    }
}

/// Sends the collected field values. Transport errors and non-2xx responses
/// both end up as the form's error message.
pub fn submit_form(
    settings: &FormSettings,
    data: Map<String, Value>,
    submitter: &mut dyn FormSubmitter,
) -> SubmitStatus {
    let request = FormRequest {
        method: settings.method.clone(),
        target: settings.action.clone(),
        payload: Value::Object(data),
    };

    match submitter.submit(&request) {
        Ok(response) if response.is_success() => {
            debug!("Form submitted to {}", request.target);
            SubmitStatus::Success(settings.success_message.clone())
        }
        Ok(response) => {
            warn!("Form submission to {} failed with status {}", request.target, response.status);
            SubmitStatus::Error(settings.error_message.clone())
        }
        Err(e) => {
            warn!("Form submission to {} failed: {:#}", request.target, e);
            SubmitStatus::Error(settings.error_message.clone())
        }
    }
}

/// `name`s of every form control below `form`, in document order.
pub fn field_names(form: &Component) -> Vec<&str> {
    let mut names = Vec::new();
    collect_names(form.children(), &mut names);
    names
}

fn collect_names<'a>(children: &'a [Component], names: &mut Vec<&'a str>) {
    for child in children {
        if let Some(name) = child.attribute_str("name") {
            names.push(name);
        }
        collect_names(child.children(), names);
    }
}
