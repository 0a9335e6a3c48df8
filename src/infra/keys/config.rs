/// Maps a deployment stack name to the parameter and secret paths the token
/// exchange reads:
///
/// ```text
/// /{stack}/cognito_provider        (SSM parameter)
/// /{stack}/machine_client_id       (SSM parameter)
/// /{stack}/machine_client_secret   (Secrets Manager)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackPaths {
    stack_name: String,
}

impl StackPaths {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
        }
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Parameter holding the Cognito user pool domain (host only, no scheme).
    pub fn cognito_provider(&self) -> String {
        self.path("cognito_provider")
    }

    pub fn machine_client_id(&self) -> String {
        self.path("machine_client_id")
    }

    pub fn machine_client_secret(&self) -> String {
        self.path("machine_client_secret")
    }

    /// OAuth2 scopes granted to the machine client on the stack's gateway.
    pub fn gateway_scope(&self) -> String {
        format!(
            "{stack}-gateway/read {stack}-gateway/write",
            stack = self.stack_name
        )
    }

    fn path(&self, leaf: &str) -> String {
        format!("/{}/{}", self.stack_name, leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths = StackPaths::new("demo");
        assert_eq!(paths.cognito_provider(), "/demo/cognito_provider");
        assert_eq!(paths.machine_client_id(), "/demo/machine_client_id");
        assert_eq!(paths.machine_client_secret(), "/demo/machine_client_secret");
    }

    #[test]
    fn test_gateway_scope() {
        assert_eq!(
            StackPaths::new("demo").gateway_scope(),
            "demo-gateway/read demo-gateway/write"
        );
    }
}
