//! Renewal reminders for members whose membership ends within the reminder window.
//!
//! Text reminders are sent inline. Invoice image reminders are queued on the worker, which
//! calls back into [`ReminderService::send_invoice_reminder`] for each member.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::reminder::{GenerateImagesDto, ReminderBatchDto},
    server::{
        data::member::MemberRepository,
        error::{worker::WorkerError, Error},
        messaging::MessagingClient,
        service::invoice::InvoiceRenderer,
        util::time::{is_reminder_candidate, reminder_window},
        worker::Worker,
    },
};

/// Outcome of the text reminder dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// Nobody ends within the reminder window.
    NoCandidates,
    /// Reminders were attempted; `count` of them were accepted by the provider.
    Sent { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReminderOutcome {
    NoCandidates,
    Queued(ReminderBatchDto),
}

pub fn text_reminder(member: &entity::member::Model) -> String {
    format!(
        "Dear {}, your gym membership expires on {}. Please renew soon. — Extreme Gym",
        member.name, member.end_date
    )
}

pub fn invoice_caption(member: &entity::member::Model) -> String {
    format!(
        "Dear {}, your {} membership ends on {}. Please renew soon. — Extreme Gym",
        member.name, member.plan, member.end_date
    )
}

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
    messaging: &'a MessagingClient,
    renderer: &'a InvoiceRenderer,
}

impl<'a> ReminderService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        messaging: &'a MessagingClient,
        renderer: &'a InvoiceRenderer,
    ) -> Self {
        Self {
            db,
            messaging,
            renderer,
        }
    }

    /// Members whose end date falls within `today..=today + 4`, soonest first.
    pub async fn candidates(&self, today: NaiveDate) -> Result<Vec<entity::member::Model>, Error> {
        let (from, to) = reminder_window(today);

        let members = MemberRepository::new(self.db)
            .find_ending_between(&from, &to)
            .await?
            .into_iter()
            .filter(|member| is_reminder_candidate(&member.end_date, today))
            .collect();

        Ok(members)
    }

    /// Sends a text reminder to every candidate, without retry or delay.
    pub async fn send_text_reminders(&self, today: NaiveDate) -> Result<ReminderOutcome, Error> {
        let candidates = self.candidates(today).await?;

        if candidates.is_empty() {
            return Ok(ReminderOutcome::NoCandidates);
        }

        let mut count = 0;
        for member in &candidates {
            if self
                .messaging
                .send_text(&member.mobile, &text_reminder(member))
                .await
            {
                count += 1;
            }
        }

        tracing::info!(
            candidates = candidates.len(),
            sent = count,
            "Sent text reminders"
        );

        Ok(ReminderOutcome::Sent { count })
    }

    /// Renders the invoice of every candidate.
    ///
    /// A render failure aborts the run; invoices written before it stay on disk.
    pub async fn generate_invoices(&self, today: NaiveDate) -> Result<GenerateImagesDto, Error> {
        let candidates = self.candidates(today).await?;

        if candidates.is_empty() {
            return Ok(GenerateImagesDto::NothingToGenerate);
        }

        let count = candidates.len();
        for member in candidates {
            self.renderer.render(member, today).await?;
        }

        tracing::info!(count, "Generated invoice images");

        Ok(GenerateImagesDto::Generated { count })
    }

    /// Renders, uploads and sends the invoice of a single member.
    ///
    /// # Returns
    /// - `Ok(true)` - The provider accepted the image message
    /// - `Ok(false)` - The provider rejected the image message
    /// - `Err(WorkerError::MemberMissing)` - The member was deleted after being queued
    /// - `Err(Error)` - Rendering or upload failed
    pub async fn send_invoice_reminder(
        &self,
        member_id: i32,
        today: NaiveDate,
    ) -> Result<bool, Error> {
        let Some(member) = MemberRepository::new(self.db).get_by_id(member_id).await? else {
            return Err(WorkerError::MemberMissing(member_id).into());
        };

        let caption = invoice_caption(&member);
        let mobile = member.mobile.clone();

        let path = self.renderer.render(member, today).await?;
        let image_url = self.messaging.upload_image(&path).await?;

        Ok(self.messaging.send_image(&mobile, &image_url, &caption).await)
    }

    /// Queues an invoice reminder for every candidate as one batch.
    pub async fn queue_image_reminders(
        &self,
        worker: &Worker,
        today: NaiveDate,
    ) -> Result<ImageReminderOutcome, Error> {
        let candidates = self.candidates(today).await?;

        if candidates.is_empty() {
            return Ok(ImageReminderOutcome::NoCandidates);
        }

        let member_ids: Vec<i32> = candidates.iter().map(|member| member.id).collect();
        let batch = worker.enqueue_invoice_reminders(&member_ids).await;

        Ok(ImageReminderOutcome::Queued(batch))
    }
}
