//! Классификация штрихкодов курьерских служб.
//!
//! Модуль определяет закрытый набор служб [`Carrier`] и для каждой из них
//! ровно одно правило [`Rule`]: проверку формата вместе с нормализацией.
//! Правило выбирается исчерпывающим `match`, поэтому новая служба не может
//! остаться без правила.

mod carrier;
mod rules;

pub use carrier::{Carrier, ParseCarrierError};
pub use rules::{Rule, classify};
