use crate::events::LoginInput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Sign-in form state. Lives on the login view and is dropped on unmount.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// A sign-in request is in flight.
    pub submitting: bool,
    /// Inline validation or provider error.
    pub error: Option<String>,
}

impl LoginForm {
    /// Edits the focused field. Any edit clears the inline error.
    pub fn apply(&mut self, input: LoginInput) {
        match input {
            LoginInput::ToggleFocus => {
                self.focus = match self.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
                return;
            }
            LoginInput::Char(c) => self.focused_mut().push(c),
            LoginInput::Backspace => {
                self.focused_mut().pop();
            }
        }
        self.error = None;
    }

    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}
