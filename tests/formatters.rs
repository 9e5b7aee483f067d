#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ecotech::libs::error::AppError;
    use ecotech::libs::formatter::{
        api_date, format_hours, format_indicator_value, format_money, format_number, parse_decimal, parse_iso_date,
        parse_optional_date, round_to, truncate,
    };
    use ecotech::libs::messages::Message;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0.0, 2), "0,00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1.000");
        assert_eq!(format_number(1_234_567.891, 2), "1.234.567,89");
        assert_eq!(format_number(-1500.5, 1), "-1.500,5");
        assert_eq!(format_number(-0.0001, 2), "0,00");
    }

    #[test]
    fn test_domain_formats() {
        assert_eq!(format_indicator_value(38_512.1), "38.512,1000");
        assert_eq!(format_hours(7.5), "7,50");
        assert_eq!(format_money(1_250_000.0), "$1.250.000");
        assert_eq!(api_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()), "02-01-2025");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(950.12344, 4), 950.1234);
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(8.0, 2), 8.0);
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            parse_iso_date(" 2025-03-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
        assert!(matches!(
            parse_iso_date("31-03-2025"),
            Err(AppError::Validation(Message::InvalidDate(_)))
        ));
        assert!(parse_iso_date("2025-02-30").is_err());

        assert_eq!(parse_optional_date("   ").unwrap(), None);
        assert!(parse_optional_date("2025-01-01").unwrap().is_some());
        assert!(parse_optional_date("mañana").is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("8.5").unwrap(), 8.5);
        assert_eq!(parse_decimal(" 8,5 ").unwrap(), 8.5);
        assert_eq!(parse_decimal("24").unwrap(), 24.0);
        assert!(matches!(parse_decimal("ocho"), Err(AppError::Validation(Message::InvalidNumber(_)))));
        assert!(parse_decimal("inf").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Reciclaje", 20), "Reciclaje");
        assert_eq!(truncate("Instalación de paneles", 10), "Instalaci…");
        assert_eq!(truncate("Instalación de paneles", 10).chars().count(), 10);
    }
}
