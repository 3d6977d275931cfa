use gift_core_types::Sensitive;

use super::ids::MemberId;
use super::relation::Relation;
use super::wish::Wish;
use crate::errors::{GiftError, Result};

/// Member - a registered shopper
///
/// `email` is unique per member (enforced by the store schema). The
/// password is wrapped in `Sensitive` so it never reaches logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    id: Option<MemberId>,
    pub email: String,
    pub password: Sensitive<String>,
    pub wishes: Relation<Wish>,
}

impl Member {
    /// Start building a new, unpersisted member
    pub fn builder() -> MemberBuilder {
        MemberBuilder::new()
    }

    /// Rebuild a member read from the store
    pub fn hydrate(id: MemberId, email: String, password: String) -> Self {
        Self {
            id: Some(id),
            email,
            password: Sensitive::new(password),
            wishes: Relation::Unloaded,
        }
    }

    /// Store-assigned identity, `None` until persisted
    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Record the identity assigned by the store
    ///
    /// # Errors
    /// * `IdentityReassigned` - if a different identity is already assigned
    pub fn assign_id(&mut self, id: MemberId) -> Result<()> {
        match self.id {
            Some(current) if current != id => Err(GiftError::IdentityReassigned {
                entity: "member",
                current: current.get(),
                attempted: id.get(),
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    pub fn wish_list(&self) -> Option<&[Wish]> {
        self.wishes.get()
    }
}

/// Builder for `Member`
#[derive(Debug, Default, Clone)]
pub struct MemberBuilder {
    email: Option<String>,
    password: Option<Sensitive<String>>,
}

impl MemberBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Sensitive::new(password.into()));
        self
    }

    /// Finish the member
    ///
    /// # Errors
    /// * `MissingField` - if email or password was never set
    /// * `InvalidEmail` - if the email is blank or lacks an '@'
    pub fn build(self) -> Result<Member> {
        let email = self.email.ok_or(GiftError::MissingField {
            entity: "member",
            field: "email",
        })?;
        let trimmed = email.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            return Err(GiftError::InvalidEmail { email });
        }
        let password = self.password.ok_or(GiftError::MissingField {
            entity: "member",
            field: "password",
        })?;

        Ok(Member {
            id: None,
            email: trimmed.to_string(),
            password,
            wishes: Relation::empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_member() {
        let member = Member::builder()
            .email("test1@pusan.ac.kr")
            .password("abc")
            .build()
            .unwrap();

        assert_eq!(member.id(), None);
        assert_eq!(member.email, "test1@pusan.ac.kr");
        assert_eq!(member.password.expose(), "abc");
        assert_eq!(member.wish_list().map(<[Wish]>::len), Some(0));
    }

    #[test]
    fn test_email_is_trimmed() {
        let member = Member::builder()
            .email("  a@b.c ")
            .password("p")
            .build()
            .unwrap();
        assert_eq!(member.email, "a@b.c");
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["", "   ", "no-at-sign"] {
            let err = Member::builder().email(email).password("p").build();
            assert!(
                matches!(err, Err(GiftError::InvalidEmail { .. })),
                "expected InvalidEmail for {:?}",
                email
            );
        }
    }

    #[test]
    fn test_missing_password_rejected() {
        let err = Member::builder().email("a@b.c").build();
        assert_eq!(
            err,
            Err(GiftError::MissingField {
                entity: "member",
                field: "password"
            })
        );
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let member = Member::builder()
            .email("a@b.c")
            .password("super-secret")
            .build()
            .unwrap();
        let debug_str = format!("{:?}", member);
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("***REDACTED***"));
    }
}
