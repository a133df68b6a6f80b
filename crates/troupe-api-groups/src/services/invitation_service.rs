//! Group invitation service.
//!
//! Invitations ride the shared usable-token lifecycle: single-use tokens
//! with a 7-day expiry, superseded when a fresh invitation is issued for the
//! same (group, account) pair.

use crate::error::ApiGroupsError;
use crate::services::group_service::GroupService;
use sqlx::PgPool;
use troupe_auth::generate_opaque_token;
use troupe_db::{
    Account, GroupInvitation, GroupInvitationStatus, GroupMember, GroupMemberRole, Usability,
    Usable,
};
use uuid::Uuid;

/// Length of invitation tokens.
const INVITATION_TOKEN_LENGTH: usize = 32;

/// Service for issuing and answering group invitations.
#[derive(Clone)]
pub struct InvitationService {
    pool: PgPool,
    groups: GroupService,
}

impl InvitationService {
    /// Create a new invitation service.
    #[must_use]
    pub fn new(pool: PgPool, groups: GroupService) -> Self {
        Self { pool, groups }
    }

    /// Invite an account (by email) into a group.
    ///
    /// Requires a managing role. Re-inviting supersedes any still-pending
    /// invitation for the same pair. The returned token is handed to the
    /// inviter for out-of-band delivery.
    pub async fn invite(
        &self,
        acting: &Account,
        group_id: Uuid,
        email: &str,
    ) -> Result<GroupInvitation, ApiGroupsError> {
        self.groups.get_group(group_id).await?;
        self.groups.require_manager(group_id, acting).await?;

        let invitee = Account::find_by_email(&self.pool, email)
            .await?
            .ok_or(ApiGroupsError::AccountNotFound)?;

        if GroupMember::find_active(&self.pool, group_id, invitee.id)
            .await?
            .is_some()
        {
            return Err(ApiGroupsError::AlreadyMember);
        }

        // Reuse the invitee's previous membership row if one exists, so
        // their history in the group stays on a single row
        let member = match GroupMember::find_latest(&self.pool, group_id, invitee.id).await? {
            Some(member) => member,
            None => {
                GroupMember::create_inactive(
                    &self.pool,
                    group_id,
                    invitee.id,
                    GroupMemberRole::Member,
                )
                .await?
            }
        };

        let token = generate_opaque_token(INVITATION_TOKEN_LENGTH);
        let invitation =
            GroupInvitation::create(&self.pool, group_id, invitee.id, member.id, &token).await?;

        tracing::info!(
            group_id = %group_id,
            account_id = %invitee.id,
            invitation_id = %invitation.id,
            "Group invitation issued"
        );

        Ok(invitation)
    }

    /// Answer an invitation.
    ///
    /// Only the invited account may respond, and only once: the conditional
    /// update admits a single response. Accepting activates the membership;
    /// rejecting leaves it inactive.
    pub async fn respond(
        &self,
        acting: &Account,
        token: &str,
        accept: bool,
    ) -> Result<Option<GroupMember>, ApiGroupsError> {
        let invitation = GroupInvitation::find_by_token(&self.pool, token)
            .await?
            .ok_or(ApiGroupsError::InvitationMissing)?;

        if invitation.account_id != acting.id {
            return Err(ApiGroupsError::Forbidden);
        }

        match invitation.usability() {
            Usability::Usable => {}
            Usability::Used => return Err(ApiGroupsError::InvitationUsed),
            Usability::Invalidated => return Err(ApiGroupsError::InvitationInvalidated),
            Usability::Expired => return Err(ApiGroupsError::InvitationExpired),
        }

        let status = if accept {
            GroupInvitationStatus::Accepted
        } else {
            GroupInvitationStatus::Rejected
        };

        if !GroupInvitation::mark_responded(&self.pool, invitation.id, status).await? {
            return Err(ApiGroupsError::InvitationUsed);
        }

        tracing::info!(
            invitation_id = %invitation.id,
            accepted = accept,
            "Group invitation answered"
        );

        if accept {
            let member = GroupMember::restore(&self.pool, invitation.group_member_id).await?;
            return Ok(Some(member));
        }

        Ok(None)
    }
}
