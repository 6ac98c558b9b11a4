// Amounts written out in words, as contracts require next to the figures

/// Converts a number into its written form in one language.
pub trait NumberSpeller: Send + Sync {
    fn language(&self) -> &str;
    fn spell(&self, value: f64) -> String;
}

const ZERO: &str = "ноль";
const ONES_MASCULINE: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];
const ONES_FEMININE: [&str; 10] = [
    "", "одна", "две", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];
const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];
const TENS: [&str; 10] = [
    "", "", "двадцать", "тридцать", "сорок", "пятьдесят", "шестьдесят", "семьдесят",
    "восемьдесят", "девяносто",
];
const HUNDREDS: [&str; 10] = [
    "", "сто", "двести", "триста", "четыреста", "пятьсот", "шестьсот", "семьсот", "восемьсот",
    "девятьсот",
];

// (one, few, many, feminine)
const SCALES: [(&str, &str, &str, bool); 8] = [
    ("", "", "", false),
    ("тысяча", "тысячи", "тысяч", true),
    ("миллион", "миллиона", "миллионов", false),
    ("миллиард", "миллиарда", "миллиардов", false),
    ("триллион", "триллиона", "триллионов", false),
    ("квадриллион", "квадриллиона", "квадриллионов", false),
    ("квинтиллион", "квинтиллиона", "квинтиллионов", false),
    ("секстиллион", "секстиллиона", "секстиллионов", false),
];

const POINT_WORD: &str = "запятая";
const MINUS_WORD: &str = "минус";

/// Russian cardinal numbers in the nominative case.
#[derive(Debug, Default, Clone, Copy)]
pub struct RussianSpeller;

impl RussianSpeller {
    pub fn new() -> Self {
        RussianSpeller
    }

    fn plural_form<'a>(n: u128, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
        match (n % 100, n % 10) {
            (11..=14, _) => many,
            (_, 1) => one,
            (_, 2..=4) => few,
            _ => many,
        }
    }

    fn triad_words(n: u128, feminine: bool, out: &mut Vec<&'static str>) {
        let hundreds = (n / 100) as usize;
        let rest = (n % 100) as usize;
        if hundreds > 0 {
            out.push(HUNDREDS[hundreds]);
        }
        match rest {
            0 => {}
            10..=19 => out.push(TEENS[rest - 10]),
            _ => {
                if rest >= 20 {
                    out.push(TENS[rest / 10]);
                }
                let ones = rest % 10;
                if ones > 0 {
                    out.push(if feminine { ONES_FEMININE[ones] } else { ONES_MASCULINE[ones] });
                }
            }
        }
    }

    /// Spells a non-negative integer; `None` when it is beyond the scale table.
    pub fn integer_words(n: u128) -> Option<String> {
        if n == 0 {
            return Some(ZERO.to_string());
        }
        let mut triads = Vec::new();
        let mut rest = n;
        while rest > 0 {
            triads.push(rest % 1000);
            rest /= 1000;
        }
        if triads.len() > SCALES.len() {
            return None;
        }

        let mut words: Vec<&'static str> = Vec::new();
        for (scale, triad) in triads.iter().enumerate().rev() {
            if *triad == 0 {
                continue;
            }
            let (one, few, many, feminine) = SCALES[scale];
            Self::triad_words(*triad, feminine, &mut words);
            if scale > 0 {
                words.push(Self::plural_form(*triad, one, few, many));
            }
        }
        Some(words.join(" "))
    }
}

impl NumberSpeller for RussianSpeller {
    fn language(&self) -> &str {
        "ru"
    }

    fn spell(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        // Display for f64 never switches to exponent notation
        let digits = format!("{}", value.abs());
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((left, right)) => (left, Some(right)),
            None => (digits.as_str(), None),
        };
        let Some(int_words) = int_part.parse::<u128>().ok().and_then(Self::integer_words) else {
            return value.to_string();
        };

        let mut spelled = String::new();
        if value < 0.0 {
            spelled.push_str(MINUS_WORD);
            spelled.push(' ');
        }
        spelled.push_str(&int_words);

        if let Some(frac) = frac_part {
            let significant = frac.trim_start_matches('0');
            spelled.push(' ');
            spelled.push_str(POINT_WORD);
            for _ in 0..frac.len() - significant.len() {
                spelled.push(' ');
                spelled.push_str(ZERO);
            }
            if let Some(words) = significant.parse::<u128>().ok().and_then(Self::integer_words) {
                spelled.push(' ');
                spelled.push_str(&words);
            }
        }
        spelled
    }
}
