const READ_ONLY_LIST: &str = "global::System.Collections.Generic.IReadOnlyList<string>";

/// Delivery target of a message, one generated `CallOn*` method each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchVariant {
    All,
    AllExcept,
    Client,
    Clients,
    Group,
    Groups,
    GroupExcept,
    User,
    Users,
}

impl DispatchVariant {
    /// Every variant, in emission order.
    pub const ALL: [Self; 9] = [
        Self::All,
        Self::AllExcept,
        Self::Client,
        Self::Clients,
        Self::Group,
        Self::Groups,
        Self::GroupExcept,
        Self::User,
        Self::Users,
    ];

    /// Member of `IHubClients<T>` selecting the target.
    pub fn target(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::AllExcept => "AllExcept",
            Self::Client => "Client",
            Self::Clients => "Clients",
            Self::Group => "Group",
            Self::Groups => "Groups",
            Self::GroupExcept => "GroupExcept",
            Self::User => "User",
            Self::Users => "Users",
        }
    }

    pub fn method_name(self) -> String {
        format!("CallOn{}", self.target())
    }

    /// Parameters following the `hubClients` parameter, as `(type, name)`.
    pub fn parameters(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::All => &[],
            Self::AllExcept => &[(READ_ONLY_LIST, "excludedConnectionIds")],
            Self::Client => &[("string", "connectionId")],
            Self::Clients => &[(READ_ONLY_LIST, "connectionIds")],
            Self::Group => &[("string", "groupName")],
            Self::Groups => &[(READ_ONLY_LIST, "groupNames")],
            Self::GroupExcept => &[
                ("string", "groupName"),
                (READ_ONLY_LIST, "excludedConnectionIds"),
            ],
            Self::User => &[("string", "userId")],
            Self::Users => &[(READ_ONLY_LIST, "userIds")],
        }
    }

    /// Expression selecting the target on `hubClients` (`All`, `Group(groupName)`).
    pub fn address(self) -> String {
        let parameters = self.parameters();
        if parameters.is_empty() {
            return self.target().to_owned();
        }

        let arguments: Vec<_> = parameters.iter().map(|(_, name)| *name).collect();
        format!("{}({})", self.target(), arguments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DispatchVariant::All, "All")]
    #[case(DispatchVariant::AllExcept, "AllExcept(excludedConnectionIds)")]
    #[case(DispatchVariant::Client, "Client(connectionId)")]
    #[case(DispatchVariant::Clients, "Clients(connectionIds)")]
    #[case(DispatchVariant::Group, "Group(groupName)")]
    #[case(DispatchVariant::Groups, "Groups(groupNames)")]
    #[case(DispatchVariant::GroupExcept, "GroupExcept(groupName, excludedConnectionIds)")]
    #[case(DispatchVariant::User, "User(userId)")]
    #[case(DispatchVariant::Users, "Users(userIds)")]
    fn test_address(#[case] variant: DispatchVariant, #[case] expected: &str) {
        assert_eq!(variant.address(), expected);
    }

    #[test]
    fn test_all_variants_distinct() {
        let mut names: Vec<_> = DispatchVariant::ALL.iter().map(|v| v.method_name()).collect();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), 9);
        assert_eq!(DispatchVariant::ALL[0].method_name(), "CallOnAll");
    }

    #[test]
    fn test_list_parameters_fully_qualified() {
        let (ty, _) = DispatchVariant::Users.parameters()[0];
        assert_eq!(ty, "global::System.Collections.Generic.IReadOnlyList<string>");
    }
}
