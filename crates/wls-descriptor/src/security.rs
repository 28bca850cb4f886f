//! Principal mapping for the resource adapter.

/// `default-principal-name`, `manage-as-principal-name` and the mapped
/// caller principal of a security work context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnonPrincipal {
    use_anonymous_identity: Option<bool>,
    principal_name: Option<String>,
}

impl AnonPrincipal {
    pub fn new(use_anonymous_identity: Option<bool>, principal_name: Option<String>) -> Self {
        Self {
            use_anonymous_identity,
            principal_name,
        }
    }

    pub fn use_anonymous_identity(&self) -> Option<bool> {
        self.use_anonymous_identity
    }

    pub fn principal_name(&self) -> Option<&str> {
        self.principal_name.as_deref()
    }
}

/// `run-as-principal-name` and `run-work-as-principal-name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallerPrincipal {
    use_anonymous_identity: Option<bool>,
    use_caller_identity: Option<bool>,
    principal_name: Option<String>,
}

impl CallerPrincipal {
    pub fn new(
        use_anonymous_identity: Option<bool>,
        use_caller_identity: Option<bool>,
        principal_name: Option<String>,
    ) -> Self {
        Self {
            use_anonymous_identity,
            use_caller_identity,
            principal_name,
        }
    }

    pub fn use_anonymous_identity(&self) -> Option<bool> {
        self.use_anonymous_identity
    }

    pub fn use_caller_identity(&self) -> Option<bool> {
        self.use_caller_identity
    }

    pub fn principal_name(&self) -> Option<&str> {
        self.principal_name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallerPrincipalMapping {
    eis_caller_principal: Option<String>,
    mapped_caller_principal: Option<AnonPrincipal>,
}

impl CallerPrincipalMapping {
    pub fn new(
        eis_caller_principal: Option<String>,
        mapped_caller_principal: Option<AnonPrincipal>,
    ) -> Self {
        Self {
            eis_caller_principal,
            mapped_caller_principal,
        }
    }

    pub fn eis_caller_principal(&self) -> Option<&str> {
        self.eis_caller_principal.as_deref()
    }

    pub fn mapped_caller_principal(&self) -> Option<&AnonPrincipal> {
        self.mapped_caller_principal.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupPrincipalMapping {
    eis_group_principal: Option<String>,
    mapped_group_principal: Option<String>,
}

impl GroupPrincipalMapping {
    pub fn new(eis_group_principal: Option<String>, mapped_group_principal: Option<String>) -> Self {
        Self {
            eis_group_principal,
            mapped_group_principal,
        }
    }

    pub fn eis_group_principal(&self) -> Option<&str> {
        self.eis_group_principal.as_deref()
    }

    pub fn mapped_group_principal(&self) -> Option<&str> {
        self.mapped_group_principal.as_deref()
    }
}

/// Unvalidated `<security-work-context>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityWorkContextParams {
    pub inbound_mapping_required: Option<bool>,
    pub caller_principal_default_mapped: Option<AnonPrincipal>,
    pub caller_principal_mappings: Vec<CallerPrincipalMapping>,
    pub group_principal_default_mapped: Option<String>,
    pub group_principal_mappings: Vec<GroupPrincipalMapping>,
}

/// Inbound security context propagation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SecurityWorkContext {
    inbound_mapping_required: Option<bool>,
    caller_principal_default_mapped: Option<AnonPrincipal>,
    caller_principal_mappings: Vec<CallerPrincipalMapping>,
    group_principal_default_mapped: Option<String>,
    group_principal_mappings: Vec<GroupPrincipalMapping>,
}

impl SecurityWorkContext {
    pub const ELEMENT: &'static str = "security-work-context";

    pub fn new(params: SecurityWorkContextParams) -> Self {
        Self {
            inbound_mapping_required: params.inbound_mapping_required,
            caller_principal_default_mapped: params.caller_principal_default_mapped,
            caller_principal_mappings: params.caller_principal_mappings,
            group_principal_default_mapped: params.group_principal_default_mapped,
            group_principal_mappings: params.group_principal_mappings,
        }
    }

    pub fn inbound_mapping_required(&self) -> Option<bool> {
        self.inbound_mapping_required
    }

    pub fn caller_principal_default_mapped(&self) -> Option<&AnonPrincipal> {
        self.caller_principal_default_mapped.as_ref()
    }

    pub fn caller_principal_mappings(&self) -> &[CallerPrincipalMapping] {
        &self.caller_principal_mappings
    }

    pub fn group_principal_default_mapped(&self) -> Option<&str> {
        self.group_principal_default_mapped.as_deref()
    }

    pub fn group_principal_mappings(&self) -> &[GroupPrincipalMapping] {
        &self.group_principal_mappings
    }
}

/// Unvalidated `<security>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceAdapterSecurityParams {
    pub default_principal_name: Option<AnonPrincipal>,
    pub manage_as_principal_name: Option<AnonPrincipal>,
    pub run_as_principal_name: Option<CallerPrincipal>,
    pub run_work_as_principal_name: Option<CallerPrincipal>,
    pub security_work_context: Option<SecurityWorkContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceAdapterSecurity {
    default_principal_name: Option<AnonPrincipal>,
    manage_as_principal_name: Option<AnonPrincipal>,
    run_as_principal_name: Option<CallerPrincipal>,
    run_work_as_principal_name: Option<CallerPrincipal>,
    security_work_context: Option<SecurityWorkContext>,
}

impl ResourceAdapterSecurity {
    pub const ELEMENT: &'static str = "security";

    pub fn new(params: ResourceAdapterSecurityParams) -> Self {
        Self {
            default_principal_name: params.default_principal_name,
            manage_as_principal_name: params.manage_as_principal_name,
            run_as_principal_name: params.run_as_principal_name,
            run_work_as_principal_name: params.run_work_as_principal_name,
            security_work_context: params.security_work_context,
        }
    }

    pub fn default_principal_name(&self) -> Option<&AnonPrincipal> {
        self.default_principal_name.as_ref()
    }

    pub fn manage_as_principal_name(&self) -> Option<&AnonPrincipal> {
        self.manage_as_principal_name.as_ref()
    }

    pub fn run_as_principal_name(&self) -> Option<&CallerPrincipal> {
        self.run_as_principal_name.as_ref()
    }

    pub fn run_work_as_principal_name(&self) -> Option<&CallerPrincipal> {
        self.run_work_as_principal_name.as_ref()
    }

    pub fn security_work_context(&self) -> Option<&SecurityWorkContext> {
        self.security_work_context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_exposes_what_it_was_built_from() {
        let context = SecurityWorkContext::new(SecurityWorkContextParams {
            inbound_mapping_required: Some(true),
            group_principal_mappings: vec![GroupPrincipalMapping::new(
                Some("eis-admins".into()),
                Some("Administrators".into()),
            )],
            ..SecurityWorkContextParams::default()
        });
        let security = ResourceAdapterSecurity::new(ResourceAdapterSecurityParams {
            default_principal_name: Some(AnonPrincipal::new(None, Some("system".into()))),
            security_work_context: Some(context),
            ..ResourceAdapterSecurityParams::default()
        });

        assert_eq!(
            security.default_principal_name().and_then(AnonPrincipal::principal_name),
            Some("system")
        );
        assert!(security.run_as_principal_name().is_none());
        let context = security.security_work_context().expect("context");
        assert_eq!(context.inbound_mapping_required(), Some(true));
        assert!(context.caller_principal_mappings().is_empty());
        assert_eq!(
            context.group_principal_mappings()[0].mapped_group_principal(),
            Some("Administrators")
        );
    }
}
