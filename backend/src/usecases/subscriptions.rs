use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use domain::{
    repositories::{companies::CompanyRepository, plans::PlanRepository},
    value_objects::{
        access::{AccessSnapshot, FetchState, GateState},
        companies::{AsaasSummaryDto, BillingStatusUpdate, SubscriptionStatusDto},
        enums::subscription_statuses::SubscriptionStatus,
    },
};
use payments::asaas_client::{AsaasClient, AsaasEvent, AsaasSubscription};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AsaasGateway: Send + Sync {
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        cpf_cnpj: &str,
        company_id: Uuid,
    ) -> AnyResult<String>;

    async fn create_subscription(
        &self,
        customer_id: &str,
        value_minor: i64,
        cycle: &str,
        next_due_date: NaiveDate,
    ) -> AnyResult<AsaasSubscription>;

    async fn retrieve_subscription(&self, subscription_id: &str) -> AnyResult<AsaasSubscription>;

    async fn cancel_subscription(&self, subscription_id: &str) -> AnyResult<()>;

    fn verify_webhook_token(&self, provided_token: &str, payload: &[u8]) -> AnyResult<AsaasEvent>;
}

#[async_trait]
impl AsaasGateway for AsaasClient {
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        cpf_cnpj: &str,
        company_id: Uuid,
    ) -> AnyResult<String> {
        self.create_customer(name, email, cpf_cnpj, company_id).await
    }

    async fn create_subscription(
        &self,
        customer_id: &str,
        value_minor: i64,
        cycle: &str,
        next_due_date: NaiveDate,
    ) -> AnyResult<AsaasSubscription> {
        self.create_subscription(customer_id, value_minor, cycle, next_due_date)
            .await
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> AnyResult<AsaasSubscription> {
        self.retrieve_subscription(subscription_id).await
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> AnyResult<()> {
        self.cancel_subscription(subscription_id).await
    }

    fn verify_webhook_token(&self, provided_token: &str, payload: &[u8]) -> AnyResult<AsaasEvent> {
        self.verify_webhook_token(provided_token, payload)
    }
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("plan is not available for subscription")]
    PlanInactive,
    #[error("invalid webhook payload: {0}")]
    InvalidWebhook(String),
    #[error("no billed subscription to cancel")]
    SubscriptionNotFound,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::PlanInactive | SubscriptionError::InvalidWebhook(_) => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

/// Billing lifecycle for a tenant: status reporting, starting and cancelling
/// an Asaas subscription, and folding webhook events back onto the company
/// row.
pub struct SubscriptionUseCase<C, P, Asaas>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Asaas: AsaasGateway + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    plan_repo: Arc<P>,
    asaas_client: Arc<Asaas>,
}

impl<C, P, Asaas> SubscriptionUseCase<C, P, Asaas>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Asaas: AsaasGateway + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, plan_repo: Arc<P>, asaas_client: Arc<Asaas>) -> Self {
        Self {
            company_repo,
            plan_repo,
            asaas_client,
        }
    }

    /// Builds the status payload the frontend gate consumes on every
    /// protected page load.
    pub async fn get_subscription_status(
        &self,
        company_id: Uuid,
    ) -> UseCaseResult<SubscriptionStatusDto> {
        let company = self.company_repo.find_by_id(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "subscriptions: failed to load company for status"
            );
            SubscriptionError::Internal(err)
        })?;

        let (plan_name, plan_price) = match company.plan_id {
            Some(plan_id) => {
                let plan = self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
                    error!(
                        %company_id,
                        %plan_id,
                        db_error = ?err,
                        "subscriptions: failed to load plan for status"
                    );
                    SubscriptionError::Internal(err)
                })?;
                (Some(plan.name), Some(plan.price_minor))
            }
            None => (None, None),
        };

        // Billing detail is best-effort decoration; the company row stays the
        // authority for the gate.
        let asaas_data = match company.asaas_subscription_id.as_deref() {
            Some(subscription_id) => match self
                .asaas_client
                .retrieve_subscription(subscription_id)
                .await
            {
                Ok(subscription) => Some(AsaasSummaryDto {
                    status: subscription.status.clone().unwrap_or_default(),
                    value: subscription.value_minor(),
                    cycle: subscription.cycle,
                    next_due_date: subscription
                        .next_due_date
                        .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
                }),
                Err(err) => {
                    warn!(
                        %company_id,
                        subscription_id,
                        error = %err,
                        "subscriptions: failed to fetch asaas subscription detail"
                    );
                    None
                }
            },
            None => None,
        };

        let now = Utc::now();
        let is_on_trial = company
            .trial_ends_at
            .map(|ends_at| ends_at > now)
            .unwrap_or(false);

        let snapshot = AccessSnapshot::from(&company);
        let status = SubscriptionStatus::from_str(&company.subscription_status);

        Ok(SubscriptionStatusDto {
            is_active: GateState::evaluate(&FetchState::Resolved(snapshot)).is_allowed(),
            status: status.to_string(),
            plan_id: company.plan_id,
            plan_name,
            plan_price,
            asaas_data,
            is_on_trial,
            trial_ends_at: company.trial_ends_at,
        })
    }

    /// Starts billing for a plan: creates the Asaas customer and
    /// subscription, links it to the company and leaves the status pending
    /// until the first payment webhook arrives.
    pub async fn subscribe(&self, company_id: Uuid, plan_id: Uuid) -> UseCaseResult<()> {
        let plan = self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            warn!(
                %company_id,
                %plan_id,
                db_error = ?err,
                "subscriptions: plan lookup failed for subscribe"
            );
            SubscriptionError::PlanNotFound
        })?;

        if !plan.is_active {
            warn!(
                %company_id,
                %plan_id,
                "subscriptions: attempt to subscribe to inactive plan"
            );
            return Err(SubscriptionError::PlanInactive);
        }

        let company = self.company_repo.find_by_id(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "subscriptions: failed to load company for subscribe"
            );
            SubscriptionError::Internal(err)
        })?;

        let customer_id = self
            .asaas_client
            .create_customer(
                &company.legal_name,
                &company.email,
                &company.tax_document,
                company_id,
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    error = %err,
                    "subscriptions: asaas customer creation failed"
                );
                SubscriptionError::Internal(err)
            })?;

        let first_due_date = (Utc::now() + Duration::days(i64::from(plan.trial_days.max(0))))
            .date_naive();

        let subscription = self
            .asaas_client
            .create_subscription(
                &customer_id,
                i64::from(plan.price_minor),
                "MONTHLY",
                first_due_date,
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    error = %err,
                    "subscriptions: asaas subscription creation failed"
                );
                SubscriptionError::Internal(err)
            })?;

        let subscription_id = subscription.id.ok_or_else(|| {
            SubscriptionError::Internal(anyhow::anyhow!("asaas subscription response missing id"))
        })?;

        self.company_repo
            .link_asaas_subscription(company_id, &subscription_id)
            .await
            .map_err(SubscriptionError::Internal)?;

        self.company_repo
            .assign_plan(company_id, Some(plan_id))
            .await
            .map_err(SubscriptionError::Internal)?;

        let status = if plan.trial_days > 0 {
            SubscriptionStatus::Trialing
        } else {
            SubscriptionStatus::Pending
        };

        self.company_repo
            .update_billing_status(
                company_id,
                BillingStatusUpdate {
                    status,
                    next_due_date: Some(first_due_date.and_time(NaiveTime::MIN).and_utc()),
                },
            )
            .await
            .map_err(SubscriptionError::Internal)?;

        info!(
            %company_id,
            %plan_id,
            subscription_id,
            status = %status,
            "subscriptions: asaas subscription created"
        );

        Ok(())
    }

    pub async fn cancel(&self, company_id: Uuid) -> UseCaseResult<()> {
        let company = self.company_repo.find_by_id(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "subscriptions: failed to load company for cancel"
            );
            SubscriptionError::Internal(err)
        })?;

        let subscription_id = company.asaas_subscription_id.ok_or_else(|| {
            let err = SubscriptionError::SubscriptionNotFound;
            warn!(
                %company_id,
                status = err.status_code().as_u16(),
                "subscriptions: no billed subscription to cancel"
            );
            err
        })?;

        self.asaas_client
            .cancel_subscription(&subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    subscription_id,
                    error = %err,
                    "subscriptions: asaas cancel failed"
                );
                SubscriptionError::Internal(err)
            })?;

        self.company_repo
            .update_billing_status(
                company_id,
                BillingStatusUpdate {
                    status: SubscriptionStatus::Canceled,
                    next_due_date: None,
                },
            )
            .await
            .map_err(SubscriptionError::Internal)?;

        info!(%company_id, subscription_id, "subscriptions: subscription cancelled");

        Ok(())
    }

    pub async fn handle_asaas_webhook(
        &self,
        payload: &[u8],
        provided_token: &str,
    ) -> UseCaseResult<()> {
        let event = self
            .asaas_client
            .verify_webhook_token(provided_token, payload)
            .map_err(|err| {
                warn!(
                    error = %err,
                    status = SubscriptionError::InvalidWebhook("".into()).status_code().as_u16(),
                    "asaas webhook authentication failed"
                );
                SubscriptionError::InvalidWebhook("webhook authentication failed".into())
            })?;

        info!(event_type = %event.event, "subscriptions: asaas webhook verified");

        let Some(status) = billing_status_for_event(&event.event) else {
            debug!("unhandled asaas event type: {:?}", event.event);
            return Ok(());
        };

        let subscription_id = event
            .payment
            .as_ref()
            .and_then(|payment| payment.subscription.clone())
            .or_else(|| {
                event
                    .subscription
                    .as_ref()
                    .and_then(|subscription| subscription.id.clone())
            })
            .ok_or_else(|| {
                let err =
                    SubscriptionError::InvalidWebhook("missing subscription id".to_string());
                warn!(
                    status = err.status_code().as_u16(),
                    "subscriptions: subscription id missing in webhook payload"
                );
                err
            })?;

        let company = self
            .company_repo
            .find_by_asaas_subscription_id(&subscription_id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to look up company for webhook"
                );
                SubscriptionError::Internal(err)
            })?;

        let Some(company) = company else {
            // Deliveries can outlive a subscription link; acknowledge so
            // Asaas stops retrying.
            warn!(
                subscription_id,
                "subscriptions: webhook for unknown subscription, ignoring"
            );
            return Ok(());
        };

        let next_due_date = self.resolve_next_due_date(&event, &subscription_id).await;

        info!(
            company_id = %company.id,
            subscription_id,
            new_status = %status,
            "subscriptions: applying billing status from webhook"
        );

        self.company_repo
            .update_billing_status(
                company.id,
                BillingStatusUpdate {
                    status,
                    next_due_date,
                },
            )
            .await
            .map_err(|err| {
                error!(
                    company_id = %company.id,
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to update billing status from webhook"
                );
                SubscriptionError::Internal(err)
            })?;

        Ok(())
    }

    /// The event payload carries the paid/overdue payment's own due date;
    /// the subscription resource knows the next one. Prefer the latter,
    /// fall back to the former.
    async fn resolve_next_due_date(
        &self,
        event: &AsaasEvent,
        subscription_id: &str,
    ) -> Option<chrono::DateTime<Utc>> {
        let from_subscription = match self
            .asaas_client
            .retrieve_subscription(subscription_id)
            .await
        {
            Ok(subscription) => subscription.next_due_date,
            Err(err) => {
                warn!(
                    subscription_id,
                    error = %err,
                    "subscriptions: could not refresh subscription for next due date"
                );
                None
            }
        };

        from_subscription
            .or_else(|| event.payment.as_ref().and_then(|payment| payment.due_date))
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }
}

fn billing_status_for_event(event_type: &str) -> Option<SubscriptionStatus> {
    match event_type {
        "PAYMENT_CONFIRMED" | "PAYMENT_RECEIVED" => Some(SubscriptionStatus::Active),
        "PAYMENT_OVERDUE" => Some(SubscriptionStatus::PastDue),
        "PAYMENT_CREDIT_CARD_CAPTURE_REFUSED" | "PAYMENT_REPROVED_BY_RISK_ANALYSIS" => {
            Some(SubscriptionStatus::PaymentFailed)
        }
        "SUBSCRIPTION_DELETED" | "SUBSCRIPTION_INACTIVATED" => Some(SubscriptionStatus::Canceled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::entities::companies::CompanyEntity;
    use domain::entities::plans::PlanEntity;
    use domain::repositories::companies::MockCompanyRepository;
    use domain::repositories::plans::MockPlanRepository;
    use domain::value_objects::plans::PlanPermissions;
    use mockall::predicate::eq;
    use payments::asaas_client::AsaasPayment;

    fn sample_company(company_id: Uuid, subscription_id: Option<&str>) -> CompanyEntity {
        let now = Utc::now();
        CompanyEntity {
            id: company_id,
            legal_name: "Espaco Leveza Ltda".to_string(),
            fantasy_name: None,
            tax_document: "11222333000181".to_string(),
            email: "financeiro@espacoleveza.example".to_string(),
            phone: None,
            plan_id: None,
            is_active: true,
            is_blocked: false,
            trial_ends_at: None,
            subscription_status: SubscriptionStatus::Active.to_string(),
            asaas_subscription_id: subscription_id.map(|id| id.to_string()),
            next_due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_plan(plan_id: Uuid) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: plan_id,
            name: "Essencial".to_string(),
            price_minor: 9_900,
            annual_price_minor: None,
            trial_days: 7,
            max_professionals: 3,
            permissions: PlanPermissions::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn confirmed_payment_event(subscription_id: &str) -> AsaasEvent {
        AsaasEvent {
            event: "PAYMENT_CONFIRMED".to_string(),
            payment: Some(AsaasPayment {
                id: Some("pay_1".to_string()),
                customer: Some("cus_1".to_string()),
                subscription: Some(subscription_id.to_string()),
                value: Some(99.0),
                status: Some("CONFIRMED".to_string()),
                due_date: Some(Utc::now().date_naive()),
            }),
            subscription: None,
        }
    }

    #[tokio::test]
    async fn status_reports_trial_and_plan_fields() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut company = sample_company(company_id, None);
        company.plan_id = Some(plan_id);
        company.subscription_status = SubscriptionStatus::Trialing.to_string();
        company.trial_ends_at = Some(Utc::now() + Duration::days(5));

        let mut company_repo = MockCompanyRepository::new();
        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id);
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(plan) })
            });

        let asaas = MockAsaasGateway::new();

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(plan_repo),
            Arc::new(asaas),
        );

        let dto = usecase.get_subscription_status(company_id).await.unwrap();

        assert!(dto.is_active);
        assert!(dto.is_on_trial);
        assert_eq!(dto.status, "trialing");
        assert_eq!(dto.plan_name.as_deref(), Some("Essencial"));
        assert_eq!(dto.plan_price, Some(9_900));
        assert!(dto.asaas_data.is_none());
    }

    #[tokio::test]
    async fn status_is_inactive_for_blocked_company() {
        let company_id = Uuid::new_v4();
        let mut company = sample_company(company_id, None);
        company.is_blocked = true;

        let mut company_repo = MockCompanyRepository::new();
        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(MockAsaasGateway::new()),
        );

        let dto = usecase.get_subscription_status(company_id).await.unwrap();
        assert!(!dto.is_active);
    }

    #[tokio::test]
    async fn confirmed_payment_marks_company_active() {
        let company_id = Uuid::new_v4();
        let subscription_id = "sub_123";

        let mut company_repo = MockCompanyRepository::new();
        let company = sample_company(company_id, Some(subscription_id));
        company_repo
            .expect_find_by_asaas_subscription_id()
            .with(eq(subscription_id))
            .returning(move |_| {
                let company = company.clone();
                Box::pin(async move { Ok(Some(company)) })
            });
        company_repo
            .expect_update_billing_status()
            .withf(move |id, update| {
                *id == company_id && update.status == SubscriptionStatus::Active
            })
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let mut asaas = MockAsaasGateway::new();
        asaas
            .expect_verify_webhook_token()
            .returning(move |_, _| Ok(confirmed_payment_event("sub_123")));
        asaas
            .expect_retrieve_subscription()
            .returning(|_| Err(anyhow::anyhow!("unavailable")));

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(asaas),
        );

        usecase
            .handle_asaas_webhook(b"{}", "token")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn overdue_payment_marks_company_past_due() {
        let company_id = Uuid::new_v4();
        let subscription_id = "sub_overdue";

        let mut company_repo = MockCompanyRepository::new();
        let company = sample_company(company_id, Some(subscription_id));
        company_repo
            .expect_find_by_asaas_subscription_id()
            .returning(move |_| {
                let company = company.clone();
                Box::pin(async move { Ok(Some(company)) })
            });
        company_repo
            .expect_update_billing_status()
            .withf(|_, update| update.status == SubscriptionStatus::PastDue)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let mut asaas = MockAsaasGateway::new();
        asaas.expect_verify_webhook_token().returning(move |_, _| {
            let mut event = confirmed_payment_event("sub_overdue");
            event.event = "PAYMENT_OVERDUE".to_string();
            Ok(event)
        });
        asaas
            .expect_retrieve_subscription()
            .returning(|_| Err(anyhow::anyhow!("unavailable")));

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(asaas),
        );

        usecase
            .handle_asaas_webhook(b"{}", "token")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_event_is_acknowledged_without_updates() {
        let company_repo = MockCompanyRepository::new();

        let mut asaas = MockAsaasGateway::new();
        asaas.expect_verify_webhook_token().returning(|_, _| {
            Ok(AsaasEvent {
                event: "PAYMENT_VIEWED".to_string(),
                payment: None,
                subscription: None,
            })
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(asaas),
        );

        usecase
            .handle_asaas_webhook(b"{}", "token")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bad_token_is_rejected() {
        let mut asaas = MockAsaasGateway::new();
        asaas
            .expect_verify_webhook_token()
            .returning(|_, _| Err(anyhow::anyhow!("invalid webhook token")));

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockCompanyRepository::new()),
            Arc::new(MockPlanRepository::new()),
            Arc::new(asaas),
        );

        let err = usecase
            .handle_asaas_webhook(b"{}", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::InvalidWebhook(_)));
    }

    #[tokio::test]
    async fn unknown_subscription_is_acknowledged() {
        let mut company_repo = MockCompanyRepository::new();
        company_repo
            .expect_find_by_asaas_subscription_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let mut asaas = MockAsaasGateway::new();
        asaas
            .expect_verify_webhook_token()
            .returning(|_, _| Ok(confirmed_payment_event("sub_gone")));

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(asaas),
        );

        usecase
            .handle_asaas_webhook(b"{}", "token")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn subscribe_links_company_to_asaas_subscription() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id);
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(plan) })
            });

        let mut company_repo = MockCompanyRepository::new();
        let company = sample_company(company_id, None);
        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });
        company_repo
            .expect_link_asaas_subscription()
            .with(eq(company_id), eq("sub_new"))
            .returning(|_, _| Box::pin(async { Ok(()) }));
        company_repo
            .expect_assign_plan()
            .with(eq(company_id), eq(Some(plan_id)))
            .returning(|_, _| Box::pin(async { Ok(()) }));
        company_repo
            .expect_update_billing_status()
            .withf(|_, update| update.status == SubscriptionStatus::Trialing)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let mut asaas = MockAsaasGateway::new();
        asaas
            .expect_create_customer()
            .returning(|_, _, _, _| Ok("cus_new".to_string()));
        asaas
            .expect_create_subscription()
            .returning(|_, _, _, next_due_date| {
                Ok(AsaasSubscription {
                    id: Some("sub_new".to_string()),
                    customer: Some("cus_new".to_string()),
                    value: Some(99.0),
                    cycle: Some("MONTHLY".to_string()),
                    status: Some("ACTIVE".to_string()),
                    next_due_date: Some(next_due_date),
                })
            });

        let usecase = SubscriptionUseCase::new(
            Arc::new(company_repo),
            Arc::new(plan_repo),
            Arc::new(asaas),
        );

        usecase.subscribe(company_id, plan_id).await.unwrap();
    }
}
