//! Shared synthetic market for the integration tests.
//!
//! Sixty weekdays of deterministic prices, FX, DI and treasury rates
//! ending on Monday 2025-05-26, plus reference data for one instrument of
//! every family.

#![allow(dead_code)]

use vertice_core::prelude::*;
use vertice_portfolio::prelude::*;

pub const DAYS: usize = 60;

pub fn today() -> Date {
    Date::from_ymd(2025, 5, 26).unwrap()
}

/// Weekdays ending today, oldest first.
pub fn dates() -> Vec<Date> {
    let mut dates = vec![today()];
    while dates.len() < DAYS {
        let last = dates[dates.len() - 1];
        dates.push(last.add_days(-1).prev_weekday());
    }
    dates.reverse();
    dates
}

/// Deterministic noise in [-0.5, 0.5).
pub struct Noise(u64);

impl Noise {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }
}

/// A random walk of `DAYS` levels ending exactly at `last`.
pub fn walk(seed: u64, last: f64, daily_vol: f64) -> Vec<(Date, f64)> {
    let mut noise = Noise::new(seed);
    let mut levels = vec![1.0];
    for _ in 1..DAYS {
        let prev = levels[levels.len() - 1];
        levels.push(prev * (1.0 + daily_vol * 3.4 * noise.next()));
    }
    let scale = last / levels[DAYS - 1];
    dates()
        .into_iter()
        .zip(levels)
        .map(|(d, l)| (d, l * scale))
        .collect()
}

/// An additive walk of rates in percent ending at `last`.
pub fn rate_walk(seed: u64, last: f64, daily_move: f64) -> Vec<(Date, f64)> {
    let mut noise = Noise::new(seed);
    let mut levels = vec![0.0];
    for _ in 1..DAYS {
        let prev = levels[levels.len() - 1];
        levels.push(prev + daily_move * noise.next());
    }
    let shift = last - levels[DAYS - 1];
    dates()
        .into_iter()
        .zip(levels)
        .map(|(d, l)| (d, l + shift))
        .collect()
}

pub const USDBRL_RATE: f64 = 5.5;
pub const PETR4_PRICE: f64 = 50.0;

pub fn option_spec() -> OptionSpec {
    OptionSpec {
        id: "Opção 1".into(),
        underlying: "PETR4".into(),
        underlying_locale: Locale::Br,
        strike: 50.0,
        expiry: Date::from_ymd(2025, 8, 18).unwrap(),
        kind: OptionKind::Call,
        notional: 100.0,
        rate: 14.75,
        dividend_yield: 0.0,
        premium: None,
    }
}

/// A call on a US underlying, quoted in USD.
pub fn us_option_spec() -> OptionSpec {
    OptionSpec {
        id: "Opção 2".into(),
        underlying: "AAPL".into(),
        underlying_locale: Locale::Us,
        strike: 200.0,
        expiry: Date::from_ymd(2025, 8, 18).unwrap(),
        kind: OptionKind::Call,
        notional: 100.0,
        rate: 4.5,
        dividend_yield: 0.0,
        premium: None,
    }
}

pub fn future_spec(id: &str, kind: FutureKind, size: f64) -> FutureSpec {
    FutureSpec {
        id: id.into(),
        kind,
        contract_size: size,
        maturity: Some(Date::from_ymd(2025, 6, 23).unwrap()),
    }
}

pub fn reference() -> ReferenceData {
    let mut reference = ReferenceData::new();
    reference.add_option(option_spec());
    reference.add_option(us_option_spec());
    reference.add_bond(BondSpec {
        id: "Título 1".into(),
        kind: BondKind::NtnF,
        coupon: 10.0,
        rate: 12.0,
        maturity: Date::from_ymd(2030, 5, 15).unwrap(),
        face: 1000.0,
    });
    reference.add_bond(BondSpec {
        id: "Título 2".into(),
        kind: BondKind::TreasuryNote,
        coupon: 4.0,
        rate: 4.2,
        maturity: Date::from_ymd(2030, 5, 31).unwrap(),
        face: 1000.0,
    });
    reference.add_future(future_spec("Futuro 1", FutureKind::EurUsd, 100_000.0));
    reference.add_future(future_spec("Futuro 2", FutureKind::UsdBrl, 50_000.0));
    reference.add_future(future_spec("Futuro 3", FutureKind::Di, 100_000.0));
    reference.add_future(future_spec("Futuro 4", FutureKind::Ibov, 1.0));
    reference
}

pub fn market() -> MarketData {
    let mut builder = MarketData::builder()
        .br_equity_series("PETR4", walk(1, PETR4_PRICE, 0.020))
        .br_equity_series("VALE3", walk(2, 60.0, 0.018))
        .br_equity_series(IBOV_TICKER, walk(3, 130_000.0, 0.012))
        .us_equity_series("AAPL", walk(4, 200.0, 0.015))
        .fx_series("USDBRL", walk(5, USDBRL_RATE, 0.008))
        .fx_series("EURUSD", walk(6, 1.10, 0.005))
        .reference(reference());

    let di_vertices = [
        (1, 10, 14.65),
        (21, 11, 14.70),
        (252, 12, 14.40),
        (1260, 13, 13.60),
        (2520, 14, 13.40),
    ];
    for (tenor, seed, last) in di_vertices {
        for (date, rate) in rate_walk(seed, last, 0.06) {
            builder = builder.di_rate(date, tenor, rate);
        }
    }
    for (label, seed, last) in [("2Y", 20, 4.0), ("5Y", 21, 4.2), ("10Y", 22, 4.4)] {
        for (date, rate) in rate_walk(seed, last, 0.05) {
            builder = builder.treasury_rate(date, label, rate);
        }
    }
    builder.build().unwrap()
}

pub fn position(id: InstrumentId, quantity: f64) -> Position {
    Position::resolve(&id, quantity, Some(&reference())).unwrap()
}

/// One position of every instrument family.
pub fn mixed_portfolio() -> Portfolio {
    Portfolio::builder()
        .name("MIXED")
        .reference_date(today())
        .add_positions([
            position(InstrumentId::br_equity("PETR4"), 1000.0),
            position(InstrumentId::br_equity("VALE3"), -400.0),
            position(InstrumentId::us_equity("AAPL"), 50.0),
            position(InstrumentId::option("Opção 1"), 10.0),
            position(InstrumentId::future("Futuro 1"), 1.0),
            position(InstrumentId::future("Futuro 2"), -2.0),
            position(InstrumentId::future("Futuro 3"), 5.0),
            position(InstrumentId::future("Futuro 4"), 3.0),
            position(InstrumentId::bond("Título 1"), 100.0),
            position(InstrumentId::bond("Título 2"), 20.0),
        ])
        .build()
        .unwrap()
}

pub fn single_equity_portfolio() -> Portfolio {
    Portfolio::builder()
        .reference_date(today())
        .add_position(position(InstrumentId::br_equity("PETR4"), 1000.0))
        .build()
        .unwrap()
}
