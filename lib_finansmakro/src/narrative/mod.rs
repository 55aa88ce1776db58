//! # Narrative Text Generation
//!
//! Canned Norwegian copy for the Dagens Puls banner and the market outlook
//! panels. The sentiment-driven text is a total mapping from the classified
//! sentiment bucket to externally supplied template strings; the default
//! templates match the live dashboard's wording. Everything here is owned
//! by the display layer and stays out of the aggregation core.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use crate::markets::quotes::{finite_or_zero, is_crypto_symbol, Quote};
use crate::markets::sectors::CORE_NORWEGIAN_STOCKS;
use crate::markets::sentiment::{SentimentLabel, SentimentSnapshot};

/// # Pulse Templates
///
/// One template string per sentiment band. Callers may supply their own
/// wording; [`PulseTemplates::default`] carries the dashboard copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseTemplates {
    /// Text for `[0, 20]`.
    pub extreme_fear: String,
    /// Text for `(20, 40]`.
    pub fear: String,
    /// Text for `(40, 60]`.
    pub neutral: String,
    /// Text for `(60, 80]`.
    pub optimism: String,
    /// Text for `(80, 100]`.
    pub extreme_optimism: String,
}

impl Default for PulseTemplates {
    fn default() -> Self {
        Self {
            extreme_fear: "Bred nedtur på Oslo Børs. Investorer søker trygge havner mens \
                           risikoviljen er på bunnivå."
                .to_string(),
            fear: "Urolig handelsdag med fallende kurser. Markedet priser inn økt usikkerhet \
                   rundt norsk økonomi."
                .to_string(),
            neutral: "Avventende stemning på Oslo Børs. Markedet veier renteforventninger mot \
                      selskapenes resultater."
                .to_string(),
            optimism: "Positiv undertone i det norske markedet med bred oppgang blant \
                       toneangivende aksjer."
                .to_string(),
            extreme_optimism: "Sterk risikovilje løfter Oslo Børs over hele linjen. \
                               Kjøpsinteressen er uvanlig høy."
                .to_string(),
        }
    }
}

impl PulseTemplates {
    /// The template for a given band. Total over all labels.
    pub fn for_label(&self, label: SentimentLabel) -> &str {
        match label {
            SentimentLabel::ExtremeFear => &self.extreme_fear,
            SentimentLabel::Fear => &self.fear,
            SentimentLabel::Neutral => &self.neutral,
            SentimentLabel::Optimism => &self.optimism,
            SentimentLabel::ExtremeOptimism => &self.extreme_optimism,
        }
    }
}

/// Picks the Dagens Puls text for a snapshot's sentiment band.
pub fn daily_pulse(snapshot: &SentimentSnapshot, templates: &PulseTemplates) -> String {
    templates.for_label(snapshot.label).to_string()
}

fn core_quotes<'a>(quotes: &'a [Quote]) -> Vec<&'a Quote> {
    quotes
        .iter()
        .filter(|q| CORE_NORWEGIAN_STOCKS.contains(&q.symbol.as_str()))
        .collect()
}

/// # Investment Trend Text
///
/// Broad-strength wording when more than half of the core Norwegian stocks
/// are up, rotation wording otherwise, placeholder while data is missing.
pub fn investment_trend_text(quotes: &[Quote]) -> String {
    let core = core_quotes(quotes);
    if core.is_empty() {
        return "Henter norske markedsdata...".to_string();
    }

    let positive = core.iter().filter(|q| q.change_percent > 0.0).count();
    if positive * 2 > core.len() {
        "▲ Norske blue-chip aksjer viser styrke med bred oppgang på Oslo Børs. \
         Energisektoren leder an drevet av stabile oljepriser, mens finanssektoren \
         støttes av høye renter. Institusjonelle investorer øker allokeringen til \
         norske selskaper."
            .to_string()
    } else {
        "▶ Blandet sentiment på Oslo Børs med sektorrotasjon mellom energi, finans \
         og teknologi. Investorer vurderer renteforventninger mot bedriftenes \
         guidinger for Q4. Fokus på utbyttebetalinger fra energiselskaper."
            .to_string()
    }
}

/// # Sector Development Text
///
/// Names the strong sectors when at least two of energy, finance and seafood
/// are up; rotation wording otherwise.
pub fn sector_development_text(quotes: &[Quote]) -> String {
    let energy = Quote::find(quotes, "EQNR");
    let bank = Quote::find(quotes, "DNB");
    let seafood = Quote::find(quotes, "MOWI");

    if energy.is_none() && bank.is_none() && seafood.is_none() {
        return "Analyserer sektorutvikling på Oslo Børs...".to_string();
    }

    let mut strong = Vec::new();
    if energy.is_some_and(|q| q.change_percent > 0.0) {
        strong.push("energi");
    }
    if bank.is_some_and(|q| q.change_percent > 0.0) {
        strong.push("finans");
    }
    if seafood.is_some_and(|q| q.change_percent > 0.0) {
        strong.push("sjømat");
    }

    if strong.len() >= 2 {
        format!(
            "▲ Flere norske nøkkelsektorer viser positiv momentum. {} leder utviklingen \
             med støtte fra gunstige fundamentale faktorer. Utsiktene for norsk \
             næringsliv forblir solide.",
            strong.join(", ")
        )
    } else {
        "▶ Sektorrotasjon på Oslo Børs med varierende prestasjoner mellom energi, bank \
         og sjømat. Markedet vurderer globale konjunktursignaler mot norske selskapers \
         konkurranseposisjon."
            .to_string()
    }
}

/// # Crypto Pulse
///
/// One sentence naming the day's largest absolute crypto move in NOK, or a
/// placeholder while the feed is empty.
pub fn crypto_pulse(quotes: &[Quote]) -> String {
    let mut cryptos: Vec<&Quote> = quotes
        .iter()
        .filter(|q| is_crypto_symbol(&q.symbol) && finite_or_zero(q.change_percent) != 0.0)
        .collect();

    if cryptos.is_empty() {
        return "Henter kryptovaluta-data...".to_string();
    }

    cryptos.sort_by(|a, b| {
        b.change_percent
            .abs()
            .partial_cmp(&a.change_percent.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top = cryptos[0];
    let direction = if top.change_percent >= 0.0 { "stiger" } else { "faller" };
    let display = if top.name.is_empty() {
        top.symbol.clone()
    } else {
        top.name.clone()
    };
    format!(
        "{} {} {:+.1}% til {} - dagens største krypto-bevegelse i NOK.",
        display, direction, top.change_percent, top.price
    )
}
