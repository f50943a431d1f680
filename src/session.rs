use crate::api_connection::ChatMessage;

/// What happens to the current menu when a refined one arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefinementPolicy {
    /// The refined menu replaces the current one; nothing is kept.
    #[default]
    Overwrite,
    /// Superseded menus are kept in [`Session::menu_history`].
    KeepHistory,
}

/// State of one interactive session, owned and passed around by the caller.
///
/// The conversation only grows; messages are never edited or removed until
/// [`Session::clear`] ends the session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    conversation: Vec<ChatMessage>,
    current_menu: Option<String>,
    menu_history: Vec<String>,
    policy: RefinementPolicy,
}

impl Session {
    pub fn new(policy: RefinementPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RefinementPolicy {
        self.policy
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.conversation.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.conversation.push(ChatMessage::assistant(content));
    }

    pub fn current_menu(&self) -> Option<&str> {
        self.current_menu.as_deref()
    }

    /// Oldest first. Always empty under [`RefinementPolicy::Overwrite`].
    pub fn menu_history(&self) -> &[String] {
        &self.menu_history
    }

    pub fn record_menu(&mut self, menu: impl Into<String>) {
        let previous = self.current_menu.replace(menu.into());
        if let (RefinementPolicy::KeepHistory, Some(previous)) = (self.policy, previous) {
            self.menu_history.push(previous);
        }
    }

    pub fn clear(&mut self) {
        self.conversation.clear();
        self.current_menu = None;
        self.menu_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_connection::Role;

    #[test]
    fn test_conversation_appends_in_order() {
        let mut session = Session::default();
        session.push_user("first");
        session.push_assistant("reply");
        session.push_user("second");
        let roles: Vec<Role> = session.conversation().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(session.conversation()[2].content, "second");
    }

    #[test]
    fn test_overwrite_policy_drops_previous_menu() {
        let mut session = Session::new(RefinementPolicy::Overwrite);
        session.record_menu("v1");
        session.record_menu("v2");
        assert_eq!(session.current_menu(), Some("v2"));
        assert!(session.menu_history().is_empty());
    }

    #[test]
    fn test_keep_history_policy_retains_superseded_menus() {
        let mut session = Session::new(RefinementPolicy::KeepHistory);
        session.record_menu("v1");
        session.record_menu("v2");
        session.record_menu("v3");
        assert_eq!(session.current_menu(), Some("v3"));
        assert_eq!(session.menu_history(), ["v1".to_string(), "v2".to_string()]);
    }

    #[test]
    fn test_clear_resets_state_but_keeps_policy() {
        let mut session = Session::new(RefinementPolicy::KeepHistory);
        session.push_user("hello");
        session.record_menu("v1");
        session.record_menu("v2");
        session.clear();
        assert!(session.conversation().is_empty());
        assert_eq!(session.current_menu(), None);
        assert!(session.menu_history().is_empty());
        assert_eq!(session.policy(), RefinementPolicy::KeepHistory);
    }
}
