// SPDX-License-Identifier: GPL-3.0-only

//! WhatsApp deep links
//!
//! Links carry text only; images never travel over them.

use super::ShareChannel;
use crate::constants::links::{COMPOSE_BASE, DIRECT_BASE, INTENT_BASE, INTENT_SUFFIX};

/// Keep only ASCII digits of a phone number
pub fn digits_only(recipient: &str) -> String {
    recipient.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Direct conversation with `digits`, prefilled with `text`
pub fn direct_link(digits: &str, text: &str) -> String {
    format!("{}{}?text={}", DIRECT_BASE, digits, urlencoding::encode(text))
}

/// Generic compose screen prefilled with `text`
pub fn compose_link(text: &str) -> String {
    format!("{}?text={}", COMPOSE_BASE, urlencoding::encode(text))
}

/// Android intent variant of the compose link
pub fn intent_link(text: &str) -> String {
    format!(
        "{}?text={}{}",
        INTENT_BASE,
        urlencoding::encode(text),
        INTENT_SUFFIX
    )
}

/// Link channels to try, in order
///
/// A recipient with no digits counts as absent. The intent variant is the
/// last resort after the primary link.
pub fn handoff_links(text: &str, recipient: Option<&str>) -> Vec<(ShareChannel, String)> {
    let digits = recipient.map(digits_only).filter(|d| !d.is_empty());
    let primary = match digits {
        Some(digits) => (ShareChannel::DirectLink, direct_link(&digits, text)),
        None => (ShareChannel::ComposeLink, compose_link(text)),
    };
    vec![primary, (ShareChannel::IntentLink, intent_link(text))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+55 (11) 98765-4321"), "5511987654321");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_direct_link_encodes_text() {
        assert_eq!(
            direct_link("5511999", "Nome: Ana\nCPF: 1"),
            "https://wa.me/5511999?text=Nome%3A%20Ana%0ACPF%3A%201"
        );
    }

    #[test]
    fn test_compose_link_encodes_unicode() {
        assert_eq!(
            compose_link("*Mãe*"),
            "whatsapp://send?text=%2AM%C3%A3e%2A"
        );
    }

    #[test]
    fn test_intent_link_suffix() {
        assert_eq!(
            intent_link("oi"),
            "intent://send?text=oi#Intent;scheme=whatsapp;package=com.whatsapp;end"
        );
    }

    #[test]
    fn test_recipient_selects_direct_link() {
        let links = handoff_links("oi", Some("+55 11 9"));
        assert_eq!(links[0], (ShareChannel::DirectLink, "https://wa.me/55119?text=oi".to_string()));
        assert_eq!(links[1].0, ShareChannel::IntentLink);
    }

    #[test]
    fn test_blank_recipient_uses_compose() {
        for recipient in [None, Some(""), Some("n/a")] {
            let links = handoff_links("oi", recipient);
            assert_eq!(links[0].0, ShareChannel::ComposeLink);
        }
    }
}
