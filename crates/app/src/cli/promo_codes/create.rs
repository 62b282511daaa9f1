use clap::Args;
use rust_decimal::Decimal;
use storefront::{
    money::{format_chf, from_decimal},
    promotions::{DiscountRule, DiscountType, PromoCodeName},
};
use storefront_app::{
    database::{self, Db},
    domain::promo_codes::{
        PgPromoCodesService, PromoCodesService,
        data::{NewPromoCode, PromoCodeDetails},
        records::PromoCodeUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreatePromoCodeArgs {
    /// Code customers type at checkout; stored upper-case
    #[arg(long)]
    code: String,

    /// `percentage` or `fixed`
    #[arg(long, value_parser = parse_discount_type)]
    discount_type: DiscountType,

    /// Percent for percentage codes, CHF for fixed codes
    #[arg(long)]
    value: Decimal,

    /// Create the code switched off
    #[arg(long)]
    inactive: bool,

    /// Let customers using this code pay cash
    #[arg(long)]
    unlocks_cash_payment: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

fn parse_discount_type(value: &str) -> Result<DiscountType, String> {
    value.parse()
}

fn discount_rule(discount_type: DiscountType, value: Decimal) -> Result<DiscountRule, String> {
    match discount_type {
        DiscountType::Percentage => {
            DiscountRule::percentage(value).map_err(|error| error.to_string())
        }
        DiscountType::Fixed => from_decimal(value)
            .map(DiscountRule::fixed)
            .ok_or_else(|| format!("invalid fixed discount: {value}")),
    }
}

pub(crate) async fn run(args: CreatePromoCodeArgs) -> Result<(), String> {
    let code = PromoCodeName::new(&args.code).map_err(|error| error.to_string())?;
    let rule = discount_rule(args.discount_type, args.value)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgPromoCodesService::new(Db::new(pool));

    let promo_code = service
        .create_promo_code(NewPromoCode {
            uuid: PromoCodeUuid::new(),
            details: PromoCodeDetails {
                code,
                rule,
                is_active: !args.inactive,
                unlocks_cash_payment: args.unlocks_cash_payment,
            },
        })
        .await
        .map_err(|error| format!("failed to create promo code: {error}"))?;

    let discount = match promo_code.rule {
        DiscountRule::Percentage(percent) => format!("{percent}%"),
        DiscountRule::Fixed(minor) => format_chf(minor),
    };

    println!("promo_code_uuid: {}", promo_code.uuid);
    println!("code: {}", promo_code.code);
    println!("discount: {discount}");
    println!("active: {}", promo_code.is_active);
    println!("unlocks_cash_payment: {}", promo_code.unlocks_cash_payment);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_values_are_given_in_francs() {
        assert_eq!(
            discount_rule(DiscountType::Fixed, Decimal::new(1_050, 2)),
            Ok(DiscountRule::fixed(10_50))
        );
    }

    #[test]
    fn percentages_above_one_hundred_are_refused() {
        assert!(discount_rule(DiscountType::Percentage, Decimal::from(150)).is_err());
    }
}
