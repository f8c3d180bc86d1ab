//! Решение «показывать ли объявление на странице».
//!
//! Правила проверяются по порядку, срабатывает первое:
//! 1. страница не указана — показываем (вызывающий сам разбирается с «показать всё»);
//! 2. статус не APPROVED — не показываем;
//! 3. `isActive == false` — не показываем;
//! 4. есть `placements` — страница (в верхнем регистре) должна быть в списке;
//! 5. иначе есть `showOn` — `showOn[страница в нижнем регистре] == true`;
//! 6. иначе — страница из [`DEFAULT_PAGES`].

use tracing::debug;

use crate::model::{AdStatus, Advertisement, Targeting};

/// Страницы для объявлений без таргетинга.
pub const DEFAULT_PAGES: [&str; 3] = ["home", "about", "contact"];

pub fn is_eligible(ad: &Advertisement, page: Option<&str>) -> bool {
    let page = match page {
        Some(p) if !p.is_empty() => p,
        _ => return true,
    };

    if ad.status != AdStatus::Approved {
        debug!(ad = %ad.id, status = ad.status.as_str(), "ad vetoed by status");
        return false;
    }
    if ad.is_active == Some(false) {
        debug!(ad = %ad.id, "ad vetoed: inactive");
        return false;
    }

    match ad.targeting() {
        Targeting::Placements => {
            let wanted = page.to_uppercase();
            ad.placements
                .iter()
                .flatten()
                .any(|p| p.to_uppercase() == wanted)
        }
        Targeting::ShowOn => ad
            .show_on
            .as_ref()
            .and_then(|m| m.get(&page.to_lowercase()))
            .copied()
            .unwrap_or(false),
        Targeting::Default => {
            let page = page.to_lowercase();
            DEFAULT_PAGES.contains(&page.as_str())
        }
    }
}

/// Отфильтровать список, сохранив исходный порядок.
pub fn eligible<'a>(ads: &'a [Advertisement], page: Option<&str>) -> Vec<&'a Advertisement> {
    ads.iter().filter(|ad| is_eligible(ad, page)).collect()
}
