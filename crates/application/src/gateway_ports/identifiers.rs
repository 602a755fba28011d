use std::fmt::{Display, Formatter};

use jitaccess_core::{AppError, AppResult};

/// Stored procedure name with two or three dot-separated identifier segments,
/// for example `jit.sp_Request_Create` or `db.jit.sp_Request_Create`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcedureName(String);

impl ProcedureName {
    /// Validates a procedure name against the identifier allow-list.
    pub fn new(value: &str) -> AppResult<Self> {
        let segments = value.split('.').collect::<Vec<_>>();
        if !(2..=3).contains(&segments.len())
            || !segments.iter().all(|segment| is_identifier(segment))
        {
            return Err(AppError::UnsafeIdentifier(format!(
                "unsafe stored procedure name '{value}'"
            )));
        }

        Ok(Self(value.to_owned()))
    }

    /// Returns the validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ProcedureName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Stored procedure parameter name without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterName(String);

impl ParameterName {
    /// Validates a parameter name against the identifier allow-list.
    pub fn new(value: &str) -> AppResult<Self> {
        if !is_identifier(value) {
            return Err(AppError::UnsafeIdentifier(format!(
                "unsafe stored procedure parameter name '{value}'"
            )));
        }

        Ok(Self(value.to_owned()))
    }

    /// Returns the validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ParameterName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(value: &str) -> bool {
    let mut characters = value.chars();
    match characters.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}

#[cfg(test)]
mod tests {
    use jitaccess_core::AppError;
    use proptest::prelude::*;

    use super::{ParameterName, ProcedureName};

    #[test]
    fn accepts_schema_qualified_names() {
        assert!(ProcedureName::new("jit.sp_Request_Create").is_ok());
        assert!(ProcedureName::new("JitDb.jit.sp_Request_Create").is_ok());
        assert!(ParameterName::new("DecisionComment").is_ok());
        assert!(ParameterName::new("_P1").is_ok());
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        assert!(matches!(
            ProcedureName::new("sp_Request_Create"),
            Err(AppError::UnsafeIdentifier(_))
        ));
        assert!(ProcedureName::new("a.b.c.d").is_err());
        assert!(ProcedureName::new("jit..sp").is_err());
        assert!(ProcedureName::new("jit.").is_err());
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(ProcedureName::new("jit.sp_X; DROP TABLE jit.Users").is_err());
        assert!(ProcedureName::new("jit.[sp_X]").is_err());
        assert!(ParameterName::new("@UserId").is_err());
        assert!(ParameterName::new("1Bad").is_err());
        assert!(ParameterName::new("").is_err());
    }

    proptest! {
        #[test]
        fn parameter_names_outside_the_allow_list_are_rejected(
            prefix in "[A-Za-z_][A-Za-z0-9_]{0,8}",
            bad in "[^A-Za-z0-9_]",
            suffix in "[A-Za-z0-9_]{0,8}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert!(ParameterName::new(&name).is_err());
        }

        #[test]
        fn procedure_names_outside_the_allow_list_are_rejected(
            schema in "[A-Za-z_][A-Za-z0-9_]{0,8}",
            bad in "[^A-Za-z0-9_.]",
            suffix in "[A-Za-z0-9_]{0,8}",
        ) {
            let name = format!("{schema}.sp{bad}{suffix}");
            prop_assert!(ProcedureName::new(&name).is_err());
        }

        #[test]
        fn well_formed_names_are_accepted(
            schema in "[A-Za-z_][A-Za-z0-9_]{0,8}",
            procedure in "[A-Za-z_][A-Za-z0-9_]{0,16}",
        ) {
            let name = format!("{schema}.{procedure}");
            prop_assert!(ProcedureName::new(&name).is_ok());
            prop_assert!(ParameterName::new(&procedure).is_ok());
        }
    }
}
