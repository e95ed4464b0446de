// crates/rectweb-layout/src/forms.rs
use tracing::debug;

use rectweb_core::{is_valid_name, BuildError, BuildResult, ElementKind, InputKind, NodeId};

use crate::{Application, Scope};

impl Application {
    /// Opens a form. Forms cannot be nested.
    pub fn form(&mut self, name: &str) -> BuildResult<Scope<'_>> {
        if self.enclosing_form().is_some() {
            return Err(BuildError::NestedForm { name: name.to_string() });
        }
        self.open(Some(name), None, ElementKind::Form)
    }

    /// Adds a label named `<name>_label` followed by the input itself to the
    /// current node. Returns `(input, label)`.
    pub fn input(&mut self, kind: InputKind, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("input", kind, name)
    }

    pub fn textbox(&mut self, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("textbox", InputKind::Text, name)
    }

    pub fn password(&mut self, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("password", InputKind::Password, name)
    }

    pub fn checkbox(&mut self, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("checkbox", InputKind::Checkbox, name)
    }

    pub fn radio(&mut self, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("radio", InputKind::Radio, name)
    }

    pub fn submit(&mut self, name: &str) -> BuildResult<(NodeId, NodeId)> {
        self.input_with("submit", InputKind::Submit, name)
    }

    fn input_with(
        &mut self,
        helper: &'static str,
        kind: InputKind,
        name: &str,
    ) -> BuildResult<(NodeId, NodeId)> {
        if self.enclosing_form().is_none() {
            return Err(BuildError::OutsideForm { helper });
        }
        // Checked up front so a rejected input leaves no orphan label behind.
        if !is_valid_name(name) {
            return Err(BuildError::InvalidName(name.to_string()));
        }
        let label_name = format!("{}_label", name);
        for taken in [name, label_name.as_str()] {
            if self.tree().find(taken).is_some() {
                return Err(BuildError::DuplicateName(taken.to_string()));
            }
        }

        let label = self.create(Some(&label_name), None, ElementKind::Label)?;
        let input = self.create(Some(name), None, ElementKind::Input(kind))?;
        self.tree.link_label(label, input);

        debug!("Added {} input {} with label {}", kind.as_str(), input, label);
        Ok((input, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_require_a_form() {
        let mut app = Application::new();
        assert_eq!(
            app.textbox("name"),
            Err(BuildError::OutsideForm { helper: "textbox" })
        );
        assert!(app.tree().is_empty());
    }

    #[test]
    fn test_input_creates_linked_label() {
        let mut app = Application::new();
        let mut form = app.form("signup").unwrap();
        let (input, label) = form.textbox("email").unwrap();
        let form_id = form.id();

        assert_eq!(form.tree().children(form_id), &[label, input]);
        assert_eq!(form.tree().label_target(label), Some(input));
        assert_eq!(form.tree().name(label), Some("email_label"));
        assert_eq!(form.get_node(input).unwrap().input_kind(), Some(InputKind::Text));
    }

    #[test]
    fn test_form_found_deeper_in_the_cursor() {
        let mut app = Application::new();
        let mut form = app.form("settings").unwrap();
        let mut column = form.rectangle("column").unwrap();
        assert!(column.checkbox("subscribe").is_ok());
    }

    #[test]
    fn test_nested_forms_are_rejected() {
        let mut app = Application::new();
        let mut form = app.form("outer").unwrap();
        assert!(matches!(form.form("inner"), Err(BuildError::NestedForm { .. })));
    }

    #[test]
    fn test_duplicate_input_leaves_no_label() {
        let mut app = Application::new();
        let mut form = app.form("login").unwrap();
        form.password("secret").unwrap();
        let before = form.tree().len();

        assert_eq!(
            form.password("secret"),
            Err(BuildError::DuplicateName("secret".to_string()))
        );
        assert_eq!(form.tree().len(), before);
    }

    #[test]
    fn test_invalid_input_name_leaves_no_label() {
        let mut app = Application::new();
        let mut form = app.form("profile").unwrap();
        let before = form.tree().len();

        assert_eq!(form.textbox(""), Err(BuildError::InvalidName(String::new())));
        assert_eq!(form.checkbox("9lives"), Err(BuildError::InvalidName("9lives".to_string())));
        assert_eq!(form.tree().len(), before);
        assert_eq!(form.tree().find("_label"), None);
    }

    #[test]
    fn test_taken_label_name_rejects_input() {
        let mut app = Application::new();
        let mut form = app.form("contact").unwrap();
        form.rectangle("phone_label").unwrap();
        let before = form.tree().len();

        assert_eq!(
            form.textbox("phone"),
            Err(BuildError::DuplicateName("phone_label".to_string()))
        );
        assert_eq!(form.tree().find("phone"), None);
        assert_eq!(form.tree().len(), before);
    }
}
