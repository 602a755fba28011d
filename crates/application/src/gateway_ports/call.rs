use jitaccess_core::{AppError, AppResult};
use jitaccess_domain::UserId;
use serde_json::{Map, Value};

use super::{ParameterName, ProcedureName};

/// One result row keyed by column name in column order.
pub type Row = Map<String, Value>;

/// Parameter value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// SQL `NULL`.
    Null,
    /// SQL `bit`.
    Bool(bool),
    /// SQL `bigint`.
    Int(i64),
    /// SQL `nvarchar`.
    Text(String),
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&UserId> for SqlParam {
    fn from(value: &UserId) -> Self {
        Self::Text(value.as_str().to_owned())
    }
}

impl<T> From<Option<T>> for SqlParam
where
    T: Into<SqlParam>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Whether a procedure invocation collects its result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Ignore result sets; used for mutations.
    None,
    /// Collect every result set, flattened in return order.
    Rows,
}

/// Validated stored procedure invocation with named parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureCall {
    name: ProcedureName,
    parameters: Vec<(ParameterName, SqlParam)>,
}

impl ProcedureCall {
    /// Starts a call to the named procedure.
    pub fn new(name: &str) -> AppResult<Self> {
        Ok(Self {
            name: ProcedureName::new(name)?,
            parameters: Vec::new(),
        })
    }

    /// Appends a named parameter. Names are unique, compared case-insensitively.
    pub fn param(mut self, name: &str, value: impl Into<SqlParam>) -> AppResult<Self> {
        let name = ParameterName::new(name)?;
        if self
            .parameters
            .iter()
            .any(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name.as_str()))
        {
            return Err(AppError::UnsafeIdentifier(format!(
                "duplicate stored procedure parameter '{name}' for '{}'",
                self.name
            )));
        }

        self.parameters.push((name, value.into()));
        Ok(self)
    }

    /// Returns the procedure name.
    #[must_use]
    pub fn name(&self) -> &ProcedureName {
        &self.name
    }

    /// Returns parameter names in binding order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the value bound to a parameter, if present.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&SqlParam> {
        self.parameters
            .iter()
            .find(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Returns parameter values in binding order.
    pub fn values(&self) -> impl Iterator<Item = &SqlParam> {
        self.parameters.iter().map(|(_, value)| value)
    }

    /// Renders `EXEC schema.proc @Name1 = @P1, @Name2 = @P2`.
    ///
    /// Values never appear in the statement; positional placeholders are
    /// bound in parameter order.
    #[must_use]
    pub fn statement(&self) -> String {
        let assignments = self
            .parameters
            .iter()
            .enumerate()
            .map(|(index, (name, _))| format!("@{name} = @P{}", index + 1))
            .collect::<Vec<_>>();

        if assignments.is_empty() {
            format!("EXEC {}", self.name)
        } else {
            format!("EXEC {} {}", self.name, assignments.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use jitaccess_core::AppError;

    use super::{ProcedureCall, SqlParam};

    #[test]
    fn statement_binds_every_value_positionally() {
        let call = ProcedureCall::new("jit.sp_Request_Deny")
            .and_then(|call| call.param("RequestId", 42_i64))
            .and_then(|call| call.param("ApproverUserId", "7"))
            .and_then(|call| call.param("DecisionComment", "'; DROP TABLE x; --"));
        let Ok(call) = call else {
            panic!("call should validate");
        };

        assert_eq!(
            call.statement(),
            "EXEC jit.sp_Request_Deny @RequestId = @P1, @ApproverUserId = @P2, @DecisionComment = @P3"
        );
        assert_eq!(call.values().count(), 3);
    }

    #[test]
    fn statement_without_parameters() {
        let call = ProcedureCall::new("jit.sp_Stats_Dashboard");
        assert_eq!(
            call.map(|call| call.statement()).ok().as_deref(),
            Some("EXEC jit.sp_Stats_Dashboard")
        );
    }

    #[test]
    fn duplicate_parameter_names_are_rejected() {
        let call = ProcedureCall::new("jit.sp_Request_Cancel")
            .and_then(|call| call.param("UserId", "7"))
            .and_then(|call| call.param("userid", "8"));
        assert!(matches!(call, Err(AppError::UnsafeIdentifier(_))));
    }

    #[test]
    fn missing_optional_text_binds_null() {
        let call = ProcedureCall::new("jit.sp_Request_Create")
            .and_then(|call| call.param("TicketRef", None::<String>));
        assert_eq!(
            call.ok().and_then(|call| call.parameter("TicketRef").cloned()),
            Some(SqlParam::Null)
        );
    }
}
