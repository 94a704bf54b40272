//! Правила проверки и нормализации штрихкодов.

use std::ops::RangeInclusive;

use super::Carrier;

/// Правило одной курьерской службы: предикат проверки и нормализация в одном варианте.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Префикс и один или более символов `[0-9A-Z]`. Код возвращается без изменений.
    Alphanumeric {
        /// Обязательный префикс.
        prefix: &'static str,
    },
    /// Из строки удаляются все нецифровые символы; нужно не меньше `count` цифр.
    /// Результат — последние `count` цифр.
    TrailingDigits {
        /// Длина результата.
        count: usize,
    },
    /// Первая подстрока из символа `lead` и `digits` цифр после него.
    /// Количество цифр берётся жадно.
    EmbeddedRun {
        /// Первый символ номера.
        lead: char,
        /// Допустимое число цифр после `lead`.
        digits: RangeInclusive<usize>,
    },
    /// Строка только из цифр длиной не меньше `min_len`. Код возвращается без изменений.
    Numeric {
        /// Минимальная длина.
        min_len: usize,
    },
    /// Цифры длиной `digits` с префиксом или без него.
    /// Если префикса нет, он добавляется.
    Prefixed {
        /// Префикс службы.
        prefix: &'static str,
        /// Допустимое число цифр.
        digits: RangeInclusive<usize>,
    },
    /// Принимает любую непустую строку.
    Any,
}

impl Carrier {
    /// Правило, по которому проверяются штрихкоды этой службы.
    #[must_use]
    pub fn rule(&self) -> Rule {
        match self {
            Self::Ups => Rule::Alphanumeric { prefix: "1Z" },
            Self::FedEx => Rule::TrailingDigits { count: 12 },
            Self::Usps => Rule::EmbeddedRun { lead: '9', digits: 15..=21 },
            Self::Amazon => Rule::Alphanumeric { prefix: "TBA" },
            Self::Dhl => Rule::Numeric { min_len: 10 },
            Self::Sf => Rule::Prefixed { prefix: "SF", digits: 12..=12 },
            Self::Yt => Rule::Prefixed { prefix: "YT", digits: 10..=13 },
            Self::Zto => Rule::Prefixed { prefix: "ZTO", digits: 10..=13 },
            Self::Sto => Rule::Prefixed { prefix: "STO", digits: 10..=13 },
            Self::Yd => Rule::Prefixed { prefix: "YD", digits: 10..=13 },
            Self::Generic => Rule::Any,
        }
    }
}

impl Rule {
    /// Применяет правило к уже обрезанной строке.
    ///
    /// Возвращает нормализованный код или `None`, если строка не подходит.
    #[must_use]
    pub fn apply(&self, code: &str) -> Option<String> {
        match self {
            Self::Alphanumeric { prefix } => code
                .strip_prefix(prefix)
                .filter(|rest| !rest.is_empty() && rest.bytes().all(is_upper_alnum))
                .map(|_| code.to_string()),
            Self::TrailingDigits { count } => {
                let digits: String = code.chars().filter(char::is_ascii_digit).collect();
                (digits.len() >= *count).then(|| digits[digits.len() - count..].to_string())
            }
            Self::EmbeddedRun { lead, digits } => find_run(code, *lead, digits).map(str::to_string),
            Self::Numeric { min_len } => {
                (code.len() >= *min_len && is_digits(code)).then(|| code.to_string())
            }
            Self::Prefixed { prefix, digits } => match code.strip_prefix(prefix) {
                Some(rest) if is_digit_run(rest, digits) => Some(code.to_string()),
                _ if is_digit_run(code, digits) => Some(format!("{prefix}{code}")),
                _ => None,
            },
            Self::Any => (!code.is_empty()).then(|| code.to_string()),
        }
    }
}

/// Проверяет и нормализует штрихкод по правилу выбранной службы.
///
/// Строка предварительно обрезается по краям: снимаются пробелы и управляющие
/// символы до U+0020 включительно (например, разделитель GS `\x1d`). Несовпадение с правилом —
/// штатный исход, а не ошибка: возвращается `None`.
///
/// # Пример
///
/// ```
/// use scanner::barcode::{Carrier, classify};
///
/// assert_eq!(classify("123456789012", Carrier::Sf).as_deref(), Some("SF123456789012"));
/// assert_eq!(classify("FedEx-123456789012", Carrier::FedEx).as_deref(), Some("123456789012"));
/// assert_eq!(classify("bad", Carrier::Ups), None);
/// ```
#[must_use]
pub fn classify(raw_input: &str, carrier: Carrier) -> Option<String> {
    carrier.rule().apply(raw_input.trim_matches(is_padding))
}

fn is_padding(c: char) -> bool {
    c <= ' '
}

fn is_upper_alnum(b: u8) -> bool {
    b.is_ascii_digit() || b.is_ascii_uppercase()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_digit_run(s: &str, len: &RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && is_digits(s)
}

/// Ищет самое левое вхождение `lead`, за которым следует не меньше
/// `digits.start()` цифр, и забирает не больше `digits.end()` из них.
fn find_run<'a>(code: &'a str, lead: char, digits: &RangeInclusive<usize>) -> Option<&'a str> {
    code.char_indices().filter(|&(_, c)| c == lead).find_map(|(start, _)| {
        let body = start + lead.len_utf8();
        let available = code[body..].bytes().take_while(u8::is_ascii_digit).count();
        (available >= *digits.start())
            .then(|| &code[start..body + available.min(*digits.end())])
    })
}
