//! Prompt assembly for the warranty assistant.
//!
//! Builds the system line and conversation window sent to the completion
//! service. Everything here is pure string construction over data the
//! caller already fetched -- no I/O and no clock.

use chrono::SecondsFormat;

use protecto_core::types::Timestamp;

use crate::client::ChatMessage;

/// Product facts injected into the system line when a conversation is
/// scoped to one product.
#[derive(Debug, Clone)]
pub struct ProductContext {
    pub name: String,
    pub purchase_date: Timestamp,
    pub warranties: Vec<WarrantyContext>,
}

/// One warranty's facts for the context line.
#[derive(Debug, Clone)]
pub struct WarrantyContext {
    pub r#type: String,
    pub provider: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

fn fmt_date(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build the assistant's system message, optionally anchored to a product.
pub fn system_message(context: Option<&ProductContext>) -> ChatMessage {
    let mut content = String::from(
        "You are a helpful assistant for Protecto, a product warranty management system.",
    );

    if let Some(product) = context {
        content.push_str(&format!(
            " Context: This conversation is about a product named \"{}\" purchased on {}.",
            product.name,
            fmt_date(product.purchase_date)
        ));
        for warranty in &product.warranties {
            content.push_str(&format!(
                " It has a {} warranty from {} valid from {} to {}.",
                warranty.r#type,
                warranty.provider,
                fmt_date(warranty.start_date),
                fmt_date(warranty.end_date)
            ));
        }
    }

    ChatMessage::system(content)
}

/// Assemble the full message list for a completion request.
///
/// `recent_newest_first` is the history exactly as the repository returns
/// it (newest first); it is replayed oldest-to-newest after the system
/// line. The caller has already appended the incoming user message to the
/// history, so it arrives last.
pub fn assemble(
    context: Option<&ProductContext>,
    recent_newest_first: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(recent_newest_first.len() + 1);
    messages.push(system_message(context));
    messages.extend(recent_newest_first.iter().rev().cloned());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn sample_context() -> ProductContext {
        ProductContext {
            name: "Laptop".into(),
            purchase_date: ts(2024, 1, 15),
            warranties: vec![WarrantyContext {
                r#type: "manufacturer".into(),
                provider: "Acme".into(),
                start_date: ts(2024, 1, 15),
                end_date: ts(2026, 1, 15),
            }],
        }
    }

    #[test]
    fn test_system_message_without_context() {
        let message = system_message(None);
        assert_eq!(message.role, "system");
        assert!(message.content.contains("warranty management system"));
        assert!(!message.content.contains("Context:"));
    }

    #[test]
    fn test_system_message_includes_product_and_warranty() {
        let message = system_message(Some(&sample_context()));
        assert!(message.content.contains("\"Laptop\""));
        assert!(message.content.contains("purchased on 2024-01-15T00:00:00Z"));
        assert!(message.content.contains("manufacturer warranty from Acme"));
        assert!(message.content.contains("valid from 2024-01-15T00:00:00Z"));
    }

    #[test]
    fn test_system_message_lists_every_warranty() {
        let mut context = sample_context();
        context.warranties.push(WarrantyContext {
            r#type: "extended".into(),
            provider: "ShopCare".into(),
            start_date: ts(2026, 1, 15),
            end_date: ts(2028, 1, 15),
        });

        let message = system_message(Some(&context));
        assert!(message.content.contains("manufacturer warranty from Acme"));
        assert!(message.content.contains("extended warranty from ShopCare"));
    }

    #[test]
    fn test_assemble_replays_history_chronologically() {
        let history = vec![
            ChatMessage::user("newest"),
            ChatMessage::assistant("middle"),
            ChatMessage::user("oldest"),
        ];

        let messages = assemble(None, &history);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "oldest");
        assert_eq!(messages[2].content, "middle");
        assert_eq!(messages[3].content, "newest");
    }
}
