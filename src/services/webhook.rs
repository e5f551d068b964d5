use crate::models::{BookingRequest, EntrepreneurProfile, Mentor, YouthProfile};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Source label attached to every payload
const SOURCE_LABEL: &str = "ШАГ Платформа";

/// What we know about a fired submission
///
/// The write is best-effort: a failed or unconfirmed POST is still
/// success from the user's point of view, but the uncertainty is kept
/// explicit so callers and tests can tell the two paths apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The endpoint answered with a success status
    Submitted,
    /// The request errored, timed out or answered non-2xx; the user
    /// proceeds anyway
    SubmittedUnconfirmed,
}

/// Fire-and-forget client for the external sheet webhook
///
/// Sends one flat key-value JSON body per finished flow. Keys are
/// domain labels, not field identifiers, and differ per form variant.
/// No response body is ever read.
pub struct SubmissionClient {
    url: String,
    client: Client,
}

impl SubmissionClient {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { url, client }
    }

    /// Submit a finalized booking
    pub async fn submit_booking(
        &self,
        request: &BookingRequest,
        mentor: &Mentor,
    ) -> SubmissionOutcome {
        let payload = json!({
            "Наставник": mentor.name,
            "ID наставника": request.mentor_id,
            "Формат": request.format.label(),
            "Цель встречи": request.goal,
            "Энергообмен": request.exchange_offer,
            "Слот": request.slot,
            "Цена": request.price,
            "Отправлено": timestamp(),
            "Источник": SOURCE_LABEL,
        });

        self.post("booking", payload).await
    }

    /// Submit a completed expert registration
    pub async fn submit_entrepreneur(&self, profile: &EntrepreneurProfile) -> SubmissionOutcome {
        let video = if profile.video_declared { "да" } else { "нет" };
        let payload = json!({
            "Роль": "Эксперт",
            "Имя": profile.name,
            "Компания": profile.business_name,
            "Выручка": profile.revenue,
            "Город": profile.city,
            "Индустрия": profile.industry,
            "Ценности": profile.values,
            "Запрос": profile.request,
            "Видео-визитка": video,
            "Часов в месяц": profile.hours_per_month,
            "Слоты": profile.slots.join("; "),
            "Отправлено": timestamp(),
            "Источник": SOURCE_LABEL,
        });

        self.post("entrepreneur registration", payload).await
    }

    /// Submit a completed seeker registration
    pub async fn submit_youth(&self, profile: &YouthProfile) -> SubmissionOutcome {
        let payload = json!({
            "Роль": "Ищу наставника",
            "Имя": profile.name,
            "Дата рождения": profile.birth_date,
            "Город": profile.city,
            "Телефон": profile.phone,
            "Почта": profile.email,
            "Главный фокус": profile.main_focus,
            "Цель встречи": profile.meeting_goal,
            "Энергообмен": profile.energy_exchange,
            "Отправлено": timestamp(),
            "Источник": SOURCE_LABEL,
        });

        self.post("youth registration", payload).await
    }

    /// POST the payload, swallowing every failure into an unconfirmed
    /// outcome
    async fn post(&self, variant: &'static str, payload: Value) -> SubmissionOutcome {
        let result = self.client.post(&self.url).json(&payload).send().await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Submitted {} payload", variant);
                SubmissionOutcome::Submitted
            }
            Ok(response) => {
                tracing::warn!(
                    "Submission endpoint answered {} for {} payload, proceeding anyway",
                    response.status(),
                    variant
                );
                SubmissionOutcome::SubmittedUnconfirmed
            }
            Err(e) => {
                tracing::warn!("Submission failed for {} payload, proceeding anyway: {}", variant, e);
                SubmissionOutcome::SubmittedUnconfirmed
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%d.%m.%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeetingFormat;

    fn mentor() -> Mentor {
        Mentor {
            id: "m1".to_string(),
            name: "Анна Соколова".to_string(),
            industry: "IT".to_string(),
            city: "Москва".to_string(),
            experience: "10 лет".to_string(),
            description: String::new(),
            achievements: vec![],
            request: String::new(),
            values: vec![],
            video_url: String::new(),
            avatar_url: String::new(),
            single_price: 3000,
            group_price: 1000,
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unconfirmed_not_an_error() {
        // nothing listens on this port; the outcome must still be usable
        let client = SubmissionClient::new("http://127.0.0.1:9/submit".to_string());
        let request = BookingRequest {
            mentor_id: "m1".to_string(),
            format: MeetingFormat::GroupOffline,
            goal: "цель".to_string(),
            exchange_offer: "обмен".to_string(),
            slot: "10:00".to_string(),
            price: 1000,
        };

        let outcome = client.submit_booking(&request, &mentor()).await;
        assert_eq!(outcome, SubmissionOutcome::SubmittedUnconfirmed);
    }
}
