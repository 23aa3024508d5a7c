use crate::common::TransientFlag;
use crate::events::DemoInput;

/// Demo-request form state. Lives on the home view and is dropped on unmount.
#[derive(Debug, Clone)]
pub struct DemoRequestForm {
    pub email: String,
    /// Keys go to the email field instead of the home shortcuts.
    pub editing: bool,
    /// The simulated request is in flight.
    pub submitting: bool,
    pub error: Option<String>,
    /// Confirmation panel shown in place of the form; manual close only.
    pub submitted: TransientFlag,
}

impl Default for DemoRequestForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            editing: false,
            submitting: false,
            error: None,
            submitted: TransientFlag::manual(),
        }
    }
}

impl DemoRequestForm {
    /// Edits the email field. Any edit clears the inline error.
    pub fn apply(&mut self, input: DemoInput) {
        match input {
            DemoInput::Char(c) => self.email.push(c),
            DemoInput::Backspace => {
                self.email.pop();
            }
        }
        self.error = None;
    }

    /// Neither editable nor submittable: in flight or already confirmed.
    pub fn is_locked(&self) -> bool {
        self.submitting || self.submitted.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_clears_error() {
        let mut form = DemoRequestForm {
            error: Some("Please enter a valid email address".to_string()),
            ..DemoRequestForm::default()
        };

        form.apply(DemoInput::Char('a'));
        assert_eq!(form.email, "a");
        assert!(form.error.is_none());

        form.error = Some("again".to_string());
        form.apply(DemoInput::Backspace);
        assert!(form.email.is_empty());
        assert!(form.error.is_none());
    }
}
