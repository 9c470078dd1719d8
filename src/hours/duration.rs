use crate::language::Language;

struct Units {
    hour: &'static str,
    hours: &'static str,
    minute: &'static str,
    minutes: &'static str,
    joiner: &'static str,
}

const ENGLISH: Units = Units {
    hour: "hour",
    hours: "hours",
    minute: "minute",
    minutes: "minutes",
    joiner: " ",
};

const SPANISH: Units = Units {
    hour: "hora",
    hours: "horas",
    minute: "minuto",
    minutes: "minutos",
    joiner: " y ",
};

/// Spells out a minute count as hours and minutes, e.g. `2 hours 5 minutes`.
///
/// A zero hour part drops the hour clause and a zero minute part drops the
/// minute clause. Zero overall reads as `0 minutes`.
pub fn format_duration(total_minutes: u32, language: Language) -> String {
    let units = match language {
        Language::English => &ENGLISH,
        Language::Spanish => &SPANISH,
    };
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let minute_clause = || {
        let noun = if minutes == 1 { units.minute } else { units.minutes };
        format!("{minutes} {noun}")
    };

    if hours == 0 {
        return minute_clause();
    }
    let noun = if hours == 1 { units.hour } else { units.hours };
    if minutes == 0 {
        format!("{hours} {noun}")
    } else {
        format!("{hours} {noun}{}{}", units.joiner, minute_clause())
    }
}
