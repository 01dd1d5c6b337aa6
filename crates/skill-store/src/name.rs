use crate::error::{Result, StoreError};

/// Checks that a skill name is usable as a single directory name.
///
/// # Errors
///
/// Returns [`StoreError::InvalidSkillName`] if the name is empty, `.` or
/// `..`, contains a path separator, or contains control characters.
pub fn validate_skill_name(skill_name: &str) -> Result<()> {
    let reason = if skill_name.is_empty() {
        "Skill name cannot be empty"
    } else if skill_name == "." || skill_name == ".." {
        "Skill name cannot be '.' or '..'"
    } else if skill_name.contains('/') || skill_name.contains('\\') {
        "Skill name cannot contain path separators"
    } else if skill_name.chars().any(char::is_control) {
        "Skill name cannot contain control characters"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidSkillName {
        skill_name: skill_name.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["pdf", "pdf-tools", "my_skill.v2", "技能"] {
            assert!(validate_skill_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", ".", "..", "a/b", "a\\b", "/abs", "tab\tname", "nl\n"] {
            let err = validate_skill_name(name).unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidSkillName { .. }),
                "{name:?}"
            );
        }
    }
}
