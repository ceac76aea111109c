//! Role application workflow operations

use super::QueryDispatcher;
use crate::blob::DocumentUpload;
use crate::cache::{Mutation, ScopeKey};
use crate::context::CallerContext;
use crate::error::{ClientError, ClientResult};
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use shared::models::{
    ApplicationDetails, ApplicationRole, ApplicationStatus, ReviewDecision, RoleApplication,
};

/// Role-specific payload validation; the state machine itself is role-agnostic
fn validate_details(details: &ApplicationDetails) -> ClientResult<()> {
    match details {
        ApplicationDetails::Driver(fields) => {
            validate_required_text(&fields.full_name, "full_name", MAX_NAME_LEN)?;
            validate_required_text(&fields.phone, "phone", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(
                &fields.vehicle_registration,
                "vehicle_registration",
                MAX_SHORT_TEXT_LEN,
            )?;
            validate_optional_text(
                &fields.vehicle_description,
                "vehicle_description",
                MAX_NOTE_LEN,
            )?;
        }
        ApplicationDetails::PickupPoint(fields) => {
            validate_required_text(&fields.business_name, "business_name", MAX_NAME_LEN)?;
            validate_required_text(&fields.phone, "phone", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(&fields.street_address, "street_address", MAX_ADDRESS_LEN)?;
            validate_required_text(&fields.suburb, "suburb", MAX_NAME_LEN)?;
        }
    }
    Ok(())
}

impl QueryDispatcher {
    /// Submit a role application for the calling identity
    ///
    /// Documents are uploaded first; the store then enforces the
    /// one-pending-per-role invariant. A conflict leaves the existing
    /// application (and the cache) unchanged.
    pub async fn submit_application(
        &self,
        ctx: &CallerContext,
        details: ApplicationDetails,
        documents: Vec<DocumentUpload>,
    ) -> ClientResult<RoleApplication> {
        validate_details(&details)?;
        if documents.is_empty() {
            return Err(ClientError::Validation(
                "at least one verification document is required".into(),
            ));
        }

        let mut document_refs = Vec::with_capacity(documents.len());
        for document in &documents {
            let blob = self
                .blobs()
                .put(&document.bytes, &document.content_type)
                .await?;
            document_refs.push(blob.id);
        }

        let application = self
            .store()
            .submit_application(ctx, &details, &document_refs)
            .await?;
        self.publish(Mutation::ApplicationSubmitted {
            role: application.role(),
            identity: ctx.identity.clone(),
        });
        tracing::info!(application = %application.id, role = %application.role(), by = %ctx.identity, "Application submitted");
        Ok(application)
    }

    /// The caller's current application for a role, if any
    pub async fn my_application(
        &self,
        ctx: &CallerContext,
        role: ApplicationRole,
    ) -> ClientResult<Option<RoleApplication>> {
        self.cache()
            .read_through(
                ScopeKey::Application {
                    role,
                    identity: ctx.identity.clone(),
                },
                || self.store().my_application(ctx, role),
            )
            .await
    }

    /// Status tag of the caller's current application (with the rejection
    /// reason when rejected)
    ///
    /// Derived from [`Self::my_application`] through the same cache scope,
    /// never stored independently, so the two can never disagree.
    pub async fn my_status(
        &self,
        ctx: &CallerContext,
        role: ApplicationRole,
    ) -> ClientResult<Option<ApplicationStatus>> {
        Ok(self
            .my_application(ctx, role)
            .await?
            .map(|application| application.status))
    }

    /// The Admin review queue
    pub async fn pending_applications(
        &self,
        ctx: &CallerContext,
    ) -> ClientResult<Vec<RoleApplication>> {
        self.require_admin(ctx).await?;
        self.cache()
            .read_through(ScopeKey::PendingApplications, || {
                self.store().list_pending_applications(ctx)
            })
            .await
    }

    /// Approve or reject a pending application (Admin only)
    pub async fn review_application(
        &self,
        ctx: &CallerContext,
        application_id: &str,
        decision: ReviewDecision,
        reason: Option<String>,
    ) -> ClientResult<RoleApplication> {
        self.require_admin(ctx).await?;
        if decision == ReviewDecision::Reject
            && reason.as_deref().map(str::trim).unwrap_or("").is_empty()
        {
            return Err(ClientError::Validation("rejection requires a reason".into()));
        }

        let reviewed = self
            .store()
            .review_application(ctx, application_id, decision, reason.as_deref())
            .await?;
        self.publish(Mutation::ApplicationReviewed {
            role: reviewed.role(),
            identity: reviewed.identity.clone(),
        });
        tracing::info!(application = %reviewed.id, status = %reviewed.status, by = %ctx.identity, "Application reviewed");
        Ok(reviewed)
    }
}
