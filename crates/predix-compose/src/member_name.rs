//! Member-name extraction from selector lambdas

use crate::ComposeError;
use predix_expr::{Expr, Lambda};

/// Name of the member a selector such as `|p| p.age` reads
///
/// Only the outermost node is inspected: `|p| p.address.city` yields
/// `"city"`. Selectors of any arity are accepted.
///
/// # Errors
/// - `NullExpression` if no selector was supplied
/// - `StaticMemberNotSupported` if the body reads a static member, with or
///   without a receiver
/// - `NotAMemberAccess` if the body is anything other than an instance
///   member read on a receiver
///
/// # Examples
///
/// ```
/// use predix_compose::member_name;
/// use predix_expr::{Expr, Lambda, MemberDescriptor, Parameter, ValueType};
///
/// let p = Parameter::new("p", ValueType::record("Person"));
/// let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
/// let selector = Lambda::new(vec![p.clone()], Expr::member(Expr::parameter(&p), age).unwrap()).unwrap();
///
/// assert_eq!(member_name(Some(&selector)).unwrap(), "age");
/// assert!(member_name(None).is_err());
/// ```
pub fn member_name(selector: Option<&Lambda>) -> Result<String, ComposeError> {
    let selector = selector.ok_or_else(|| ComposeError::NullExpression("selector".to_string()))?;

    match selector.body() {
        Expr::Member { member, .. } if !member.is_instance() => Err(
            ComposeError::StaticMemberNotSupported(format!("{}::{}", member.owner, member.name)),
        ),
        Expr::Member {
            receiver: Some(_),
            member,
        } => Ok(member.name.clone()),
        other => Err(ComposeError::NotAMemberAccess(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predix_expr::{MemberDescriptor, Parameter, ValueType};

    fn person() -> Parameter {
        Parameter::new("p", ValueType::record("Person"))
    }

    fn selector(p: &Parameter, body: Expr) -> Lambda {
        Lambda::new(vec![p.clone()], body).unwrap()
    }

    #[test]
    fn test_instance_member() {
        let p = person();
        let name = MemberDescriptor::instance("Person", "name", ValueType::Str);
        let sel = selector(&p, Expr::member(Expr::parameter(&p), name).unwrap());
        assert_eq!(member_name(Some(&sel)).unwrap(), "name");
    }

    #[test]
    fn test_outermost_member_of_chain() {
        let p = person();
        let address = MemberDescriptor::instance("Person", "address", ValueType::record("Address"));
        let city = MemberDescriptor::instance("Address", "city", ValueType::Str);
        let chain = Expr::member(Expr::member(Expr::parameter(&p), address).unwrap(), city).unwrap();
        assert_eq!(member_name(Some(&selector(&p, chain))).unwrap(), "city");
    }

    #[test]
    fn test_static_member_on_receiver_rejected() {
        let p = person();
        let max = MemberDescriptor::static_member("Person", "MAX_AGE", ValueType::Int);
        let body = Expr::Member {
            receiver: Some(Box::new(Expr::parameter(&p))),
            member: max,
        };
        let sel = selector(&p, body);

        assert_eq!(
            member_name(Some(&sel)).unwrap_err(),
            ComposeError::StaticMemberNotSupported("Person::MAX_AGE".to_string())
        );
    }

    #[test]
    fn test_instance_member_without_receiver_rejected() {
        let p = person();
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        let sel = selector(&p, Expr::Member { receiver: None, member: age });
        assert!(matches!(
            member_name(Some(&sel)),
            Err(ComposeError::NotAMemberAccess(_))
        ));
    }

    #[test]
    fn test_missing_selector() {
        assert_eq!(
            member_name(None).unwrap_err(),
            ComposeError::NullExpression("selector".to_string())
        );
    }

    #[test]
    fn test_static_member_rejected() {
        let p = person();
        let max = MemberDescriptor::static_member("Person", "MAX_AGE", ValueType::Int);
        let sel = selector(&p, Expr::static_member(max).unwrap());
        assert_eq!(
            member_name(Some(&sel)).unwrap_err(),
            ComposeError::StaticMemberNotSupported("Person::MAX_AGE".to_string())
        );
    }

    #[test]
    fn test_non_member_bodies_rejected() {
        let p = person();
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        let age_expr = Expr::member(Expr::parameter(&p), age).unwrap();

        let bodies = [
            Expr::parameter(&p),
            Expr::int(7),
            Expr::gt(age_expr, Expr::int(1)).unwrap(),
        ];
        for body in bodies {
            let sel = selector(&p, body);
            assert!(matches!(
                member_name(Some(&sel)),
                Err(ComposeError::NotAMemberAccess(_))
            ));
        }
    }

    #[test]
    fn test_not_a_member_message_renders_body() {
        let p = person();
        let sel = selector(&p, Expr::int(7));
        assert_eq!(
            member_name(Some(&sel)).unwrap_err(),
            ComposeError::NotAMemberAccess("7".to_string())
        );
    }
}
