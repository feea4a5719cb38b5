//! Validation for the `[chat]` section.

use crate::schema::HuddleConfig;

pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &HuddleConfig) {
    if config.chat.system_author.trim().is_empty() {
        errors.push("chat.system_author must not be empty".into());
    }
}
