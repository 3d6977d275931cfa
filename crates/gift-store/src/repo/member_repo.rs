//! Member-specific queries

#![allow(clippy::result_large_err)]

use gift_core::{Member, MemberId};

use super::MemberRepository;
use crate::errors::Result;

impl<'c> MemberRepository<'c> {
    /// Member registered under `email`
    ///
    /// The address is matched after trimming, the same way builders store it.
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    pub fn find_by_email(&self, email: &str) -> Result<Option<Member>> {
        self.instrument("find_by_email", || {
            let email = email.trim();
            let members = self.query_entities(
                "find_by_email",
                &Self::select_sql("WHERE e.email = ?1"),
                &[&email],
            )?;
            Ok(members.into_iter().next())
        })
    }

    /// Member `id` with its wishes, fetched in one joined statement
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    pub fn find_member_with_relation(&self, id: MemberId) -> Result<Option<Member>> {
        self.instrument("find_member_with_relation", || {
            let members =
                self.fetch_with_wishes("find_member_with_relation", "WHERE o.id = ?1", &id.get())?;
            Ok(members.into_iter().next())
        })
    }
}
