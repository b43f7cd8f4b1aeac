//! Aggregation reporter
//!
//! Read-side summaries derived from the registration ledger on demand.
//! Nothing here is persisted; every report is a fresh scan of the fetched
//! rows, which is fine at single-organization dataset sizes.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::database::{EventRepository, RegistrationRepository, UserRepository};
use crate::models::analytics::{
    ActivityEntry, AdminDashboardStats, AggregateReport, AnalyticsOverview, DateRange,
    EventRevenue, MonthlyRevenue, PaymentMethodShare, PaymentStats, UserDashboardStats,
};
use crate::models::event::EventWithCounts;
use crate::models::registration::{ApprovalStatus, PaymentStatus, Registration, RegistrationDetails};
use crate::models::user::UserRole;
use crate::utils::errors::Result;
use crate::utils::helpers::month_key;

/// How many events the revenue ranking keeps
const TOP_EVENTS_LIMIT: usize = 5;

/// How many entries the admin activity feed shows
const RECENT_ACTIVITY_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct AnalyticsService {
    registrations: RegistrationRepository,
    events: EventRepository,
    users: UserRepository,
}

impl AnalyticsService {
    pub fn new(
        registrations: RegistrationRepository,
        events: EventRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            registrations,
            events,
            users,
        }
    }

    /// Build the full aggregate report, optionally restricted to
    /// registrations created inside a date window.
    pub async fn get_analytics(&self, range: Option<DateRange>) -> Result<AggregateReport> {
        let registrations = match range {
            Some(range) => {
                self.registrations
                    .find_created_between(range.start, range.end)
                    .await?
            }
            None => self.registrations.find_all_plain().await?,
        };

        debug!(rows = registrations.len(), "Computing aggregate report");

        let ranking = event_revenue_ranking(&registrations, TOP_EVENTS_LIMIT);
        let mut top_events = Vec::with_capacity(ranking.len());
        for (event_id, registrations_count, total_revenue) in ranking {
            let title = self
                .events
                .find_by_id(event_id)
                .await?
                .map(|e| e.title)
                .unwrap_or_else(|| "Unknown Event".to_string());

            top_events.push(EventRevenue {
                event_id,
                title,
                registrations: registrations_count,
                average_price: total_revenue / registrations_count as f64,
                total_revenue,
            });
        }

        Ok(AggregateReport {
            overview: overview(&registrations),
            revenue_by_month: revenue_by_month(&registrations),
            top_events,
            payment_methods: method_distribution(&registrations),
        })
    }

    /// A user's payments with summary stats
    pub async fn payments_for_user(
        &self,
        user_id: i64,
    ) -> Result<(Vec<RegistrationDetails>, PaymentStats)> {
        let rows = self.registrations.find_by_user(user_id).await?;
        let stats = payment_stats(rows.iter().map(|r| &r.registration));
        Ok((rows, stats))
    }

    /// All payment-bearing registrations with summary stats (admin view)
    pub async fn payments_overview(&self) -> Result<(Vec<RegistrationDetails>, PaymentStats)> {
        let rows = self.registrations.find_payments().await?;
        let stats = payment_stats(rows.iter().map(|r| &r.registration));
        Ok((rows, stats))
    }

    /// Registrant-facing dashboard
    pub async fn user_dashboard(
        &self,
        user_id: i64,
    ) -> Result<(UserDashboardStats, Vec<RegistrationDetails>)> {
        let rows = self.registrations.find_by_user(user_id).await?;
        let now = Utc::now();

        let stats = UserDashboardStats {
            total_registered: rows.len(),
            approved_registrations: rows
                .iter()
                .filter(|r| r.registration.status == ApprovalStatus::Approved)
                .count(),
            upcoming_count: rows.iter().filter(|r| r.event_date >= now).count(),
        };

        Ok((stats, rows))
    }

    /// Admin dashboard: platform counters, the admin's events with
    /// registration counts, and a recent-registrations activity feed.
    pub async fn admin_dashboard(
        &self,
        admin_id: i64,
    ) -> Result<(AdminDashboardStats, Vec<EventWithCounts>, Vec<ActivityEntry>)> {
        let stats = AdminDashboardStats {
            total_users: self.users.count_by_role(UserRole::User).await?,
            total_events: self.events.count().await?,
            active_events: self.events.count_upcoming().await?,
            pending_approvals: self
                .registrations
                .count_by_status(ApprovalStatus::Pending)
                .await?,
        };

        let mut admin_events = Vec::new();
        for event in self.events.find_by_creator(admin_id).await? {
            let (registration_count, pending_count) =
                self.registrations.count_for_event(event.id).await?;
            admin_events.push(EventWithCounts {
                event,
                registration_count,
                pending_count,
            });
        }

        let activities = self
            .registrations
            .find_recent(RECENT_ACTIVITY_LIMIT)
            .await?
            .into_iter()
            .map(|r| ActivityEntry {
                message: format!("{} registered for {}", r.user_name, r.event_title),
                time: r.registration.created_at,
                status: r.registration.status.to_string(),
            })
            .collect();

        Ok((stats, admin_events, activities))
    }
}

/// Headline numbers over a set of ledger rows
pub fn overview(registrations: &[Registration]) -> AnalyticsOverview {
    let total_registrations = registrations.len();
    let approved_registrations = registrations
        .iter()
        .filter(|r| r.status == ApprovalStatus::Approved)
        .count();
    let completed_payments = registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Completed)
        .count();
    let refunded_payments = registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Refunded)
        .count();

    let total_revenue: f64 = registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Completed)
        .map(|r| r.amount_paid)
        .sum();
    let total_refunded: f64 = registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Refunded)
        .filter_map(|r| r.refund_amount)
        .sum();

    let average_transaction_value = if completed_payments > 0 {
        total_revenue / completed_payments as f64
    } else {
        0.0
    };
    let conversion_rate = if total_registrations > 0 {
        approved_registrations as f64 / total_registrations as f64 * 100.0
    } else {
        0.0
    };

    AnalyticsOverview {
        total_registrations,
        approved_registrations,
        completed_payments,
        refunded_payments,
        total_revenue,
        total_refunded,
        average_transaction_value,
        conversion_rate,
    }
}

/// Completed revenue bucketed by calendar month, oldest bucket first.
///
/// Rows without a payment date fall back to the registration date so the
/// bucket sum always equals the overview's total revenue.
pub fn revenue_by_month(registrations: &[Registration]) -> Vec<MonthlyRevenue> {
    let mut buckets: HashMap<String, (usize, f64)> = HashMap::new();

    for r in registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Completed)
    {
        let key = month_key(r.payment_date.unwrap_or(r.registration_date));
        let entry = buckets.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.amount_paid;
    }

    let mut months: Vec<MonthlyRevenue> = buckets
        .into_iter()
        .map(|(month, (transactions, revenue))| MonthlyRevenue {
            month,
            transactions,
            revenue,
        })
        .collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

/// Events ranked by summed completed revenue, descending.
///
/// Returns (event_id, completed registrations, total revenue) tuples; title
/// resolution is left to the caller.
pub fn event_revenue_ranking(registrations: &[Registration], limit: usize) -> Vec<(i64, usize, f64)> {
    let mut by_event: HashMap<i64, (usize, f64)> = HashMap::new();

    for r in registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Completed)
    {
        let entry = by_event.entry(r.event_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.amount_paid;
    }

    let mut ranking: Vec<(i64, usize, f64)> = by_event
        .into_iter()
        .map(|(event_id, (count, revenue))| (event_id, count, revenue))
        .collect();
    ranking.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    ranking.truncate(limit);
    ranking
}

/// Payment-method shares over completed transactions
pub fn method_distribution(registrations: &[Registration]) -> Vec<PaymentMethodShare> {
    let completed: Vec<&Registration> = registrations
        .iter()
        .filter(|r| r.payment_status == PaymentStatus::Completed)
        .collect();
    let total = completed.len();

    let mut by_method: HashMap<String, usize> = HashMap::new();
    for r in &completed {
        let method = r.payment_method.clone().unwrap_or_else(|| "unknown".to_string());
        *by_method.entry(method).or_insert(0) += 1;
    }

    let mut shares: Vec<PaymentMethodShare> = by_method
        .into_iter()
        .map(|(method, count)| PaymentMethodShare {
            method,
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Summary stats for a payment listing
pub fn payment_stats<'a, I>(registrations: I) -> PaymentStats
where
    I: Iterator<Item = &'a Registration>,
{
    let mut stats = PaymentStats::default();

    for r in registrations {
        match r.payment_status {
            PaymentStatus::Completed => {
                stats.completed_payments += 1;
                stats.total_revenue += r.amount_paid;
            }
            PaymentStatus::Pending => stats.pending_payments += 1,
            PaymentStatus::Failed => stats.failed_payments += 1,
            PaymentStatus::Refunded => {
                stats.refunded_payments += 1;
                stats.total_refunded += r.refund_amount.unwrap_or(0.0);
            }
        }
    }

    stats
}
