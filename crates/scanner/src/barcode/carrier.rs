//! Перечисление курьерских служб.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Курьерская служба, по правилам которой проверяется штрихкод.
///
/// Набор закрыт: каждый вариант имеет ровно одно правило в
/// [`classify`][crate::barcode::classify]. Порядок объявления вариантов
/// используется как порядок сортировки в статистике.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Carrier {
    /// UPS, номера вида `1Z...`.
    #[default]
    #[serde(rename = "UPS")]
    Ups,
    /// FedEx, последние 12 цифр.
    #[serde(rename = "FedEx")]
    FedEx,
    /// USPS, подстрока `9` + 15..=21 цифр.
    #[serde(rename = "USPS")]
    Usps,
    /// Amazon Logistics, номера вида `TBA...`.
    #[serde(rename = "Amazon")]
    Amazon,
    /// DHL, не менее 10 цифр.
    #[serde(rename = "DHL")]
    Dhl,
    /// 顺丰 (SF Express).
    #[serde(rename = "顺丰")]
    Sf,
    /// 圆通 (YTO Express).
    #[serde(rename = "圆通")]
    Yt,
    /// 中通 (ZTO Express).
    #[serde(rename = "中通")]
    Zto,
    /// 申通 (STO Express).
    #[serde(rename = "申通")]
    Sto,
    /// 韵达 (Yunda Express).
    #[serde(rename = "韵达")]
    Yd,
    /// 通用 — принимает любую непустую строку.
    #[serde(rename = "通用")]
    Generic,
}

impl Carrier {
    /// Все службы в порядке объявления.
    pub const ALL: [Self; 11] = [
        Self::Ups,
        Self::FedEx,
        Self::Usps,
        Self::Amazon,
        Self::Dhl,
        Self::Sf,
        Self::Yt,
        Self::Zto,
        Self::Sto,
        Self::Yd,
        Self::Generic,
    ];

    /// Отображаемое название службы (попадает в CSV и статистику).
    ///
    /// # Пример
    /// ```
    /// use scanner::barcode::Carrier;
    /// assert_eq!(Carrier::FedEx.label(), "FedEx");
    /// assert_eq!(Carrier::Sf.label(), "顺丰");
    /// ```
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ups => "UPS",
            Self::FedEx => "FedEx",
            Self::Usps => "USPS",
            Self::Amazon => "Amazon",
            Self::Dhl => "DHL",
            Self::Sf => "顺丰",
            Self::Yt => "圆通",
            Self::Zto => "中通",
            Self::Sto => "申通",
            Self::Yd => "韵达",
            Self::Generic => "通用",
        }
    }

    /// ASCII-код службы для командной строки и конфигурации.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ups => "ups",
            Self::FedEx => "fedex",
            Self::Usps => "usps",
            Self::Amazon => "amazon",
            Self::Dhl => "dhl",
            Self::Sf => "sf",
            Self::Yt => "yt",
            Self::Zto => "zto",
            Self::Sto => "sto",
            Self::Yd => "yd",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Строка не соответствует ни одной курьерской службе.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Неизвестная курьерская служба: '{0}'")]
pub struct ParseCarrierError(pub String);

impl FromStr for Carrier {
    type Err = ParseCarrierError;

    /// Принимает отображаемое название (`顺丰`) или ASCII-код (`sf`, без учёта регистра).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s || c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCarrierError(s.to_string()))
    }
}
