//! Substitution vocabulary and the token map builder

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use lease_types::{GenerationContext, MaritalStatus, PersonData};

use crate::translate::Translate;

/// Date rendering used for START_DATE / END_DATE (dd/MM/yyyy)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// The closed set of placeholder names a clause body may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Property,
    Street,
    Number,
    Zipcode,
    Neighborhood,
    City,
    State,
    Landlord,
    LandlordNationality,
    LandlordMaritalStatus,
    LandlordRg,
    LandlordCpf,
    LandlordBirthplace,
    Tenant,
    TenantNationality,
    TenantMaritalStatus,
    TenantRg,
    TenantCpf,
    TenantBirthplace,
    Guarantor,
    GuarantorNationality,
    GuarantorRg,
    GuarantorCpf,
    GuarantorBirthplace,
    Rent,
    DueDay,
    StartDate,
    EndDate,
}

impl Token {
    pub const ALL: [Token; 28] = [
        Token::Property,
        Token::Street,
        Token::Number,
        Token::Zipcode,
        Token::Neighborhood,
        Token::City,
        Token::State,
        Token::Landlord,
        Token::LandlordNationality,
        Token::LandlordMaritalStatus,
        Token::LandlordRg,
        Token::LandlordCpf,
        Token::LandlordBirthplace,
        Token::Tenant,
        Token::TenantNationality,
        Token::TenantMaritalStatus,
        Token::TenantRg,
        Token::TenantCpf,
        Token::TenantBirthplace,
        Token::Guarantor,
        Token::GuarantorNationality,
        Token::GuarantorRg,
        Token::GuarantorCpf,
        Token::GuarantorBirthplace,
        Token::Rent,
        Token::DueDay,
        Token::StartDate,
        Token::EndDate,
    ];

    /// Placeholder name as written inside brackets
    pub fn name(&self) -> &'static str {
        match self {
            Token::Property => "PROPERTY",
            Token::Street => "STREET",
            Token::Number => "NUMBER",
            Token::Zipcode => "ZIPCODE",
            Token::Neighborhood => "NEIGHBORHOOD",
            Token::City => "CITY",
            Token::State => "STATE",
            Token::Landlord => "LANDLORD",
            Token::LandlordNationality => "LANDLORD_NATIONALITY",
            Token::LandlordMaritalStatus => "LANDLORD_MARITAL_STATUS",
            Token::LandlordRg => "LANDLORD_RG",
            Token::LandlordCpf => "LANDLORD_CPF",
            Token::LandlordBirthplace => "LANDLORD_BIRTHPLACE",
            Token::Tenant => "TENANT",
            Token::TenantNationality => "TENANT_NATIONALITY",
            Token::TenantMaritalStatus => "TENANT_MARITAL_STATUS",
            Token::TenantRg => "TENANT_RG",
            Token::TenantCpf => "TENANT_CPF",
            Token::TenantBirthplace => "TENANT_BIRTHPLACE",
            Token::Guarantor => "GUARANTOR",
            Token::GuarantorNationality => "GUARANTOR_NATIONALITY",
            Token::GuarantorRg => "GUARANTOR_RG",
            Token::GuarantorCpf => "GUARANTOR_CPF",
            Token::GuarantorBirthplace => "GUARANTOR_BIRTHPLACE",
            Token::Rent => "RENT",
            Token::DueDay => "DUE_DAY",
            Token::StartDate => "START_DATE",
            Token::EndDate => "END_DATE",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Token> {
        Token::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token → display string. Every token of the vocabulary has an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMap {
    values: BTreeMap<Token, String>,
}

impl TokenMap {
    /// A map with every token bound to ""
    pub fn empty() -> Self {
        Self {
            values: Token::ALL.iter().map(|t| (*t, String::new())).collect(),
        }
    }

    pub fn set(&mut self, token: Token, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    /// Value for `token`; "" when unbound
    pub fn get(&self, token: Token) -> &str {
        self.values.get(&token).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.values.iter().map(|(t, v)| (*t, v.as_str()))
    }
}

impl Default for TokenMap {
    fn default() -> Self {
        Self::empty()
    }
}

/// Build the substitution values for a context
///
/// Missing data becomes "". Marital status codes are passed through
/// `translate`; dates render as dd/MM/yyyy.
pub fn build_token_map(ctx: &GenerationContext, translate: &dyn Translate) -> TokenMap {
    let mut map = TokenMap::empty();

    let property = &ctx.property;
    map.set(Token::Property, property.description.as_str());
    map.set(Token::Street, property.street.as_str());
    map.set(Token::Number, property.number.as_str());
    map.set(Token::Zipcode, property.zip_code.as_str());
    map.set(Token::Neighborhood, property.neighborhood.as_str());
    map.set(Token::City, property.city.as_deref().unwrap_or(""));
    map.set(Token::State, property.state.as_deref().unwrap_or(""));

    let landlord = &ctx.landlord;
    map.set(Token::Landlord, landlord.name.as_str());
    map.set(Token::LandlordNationality, landlord.nationality.as_str());
    map.set(
        Token::LandlordMaritalStatus,
        marital_word(landlord.marital_status, translate),
    );
    map.set(Token::LandlordRg, landlord.rg.as_str());
    map.set(Token::LandlordCpf, landlord.cpf.as_str());
    map.set(Token::LandlordBirthplace, landlord.birthplace.as_str());

    let tenant = &ctx.tenant;
    map.set(Token::Tenant, tenant.name.as_str());
    map.set(Token::TenantNationality, tenant.nationality.as_str());
    map.set(
        Token::TenantMaritalStatus,
        marital_word(tenant.marital_status, translate),
    );
    map.set(Token::TenantRg, tenant.rg.as_str());
    map.set(Token::TenantCpf, tenant.cpf.as_str());
    map.set(Token::TenantBirthplace, tenant.birthplace.as_str());

    // An unnamed guarantor contributes nothing, same as an absent one
    let blank = PersonData::default();
    let guarantor = ctx.named_guarantor().unwrap_or(&blank);
    map.set(Token::Guarantor, guarantor.name.as_str());
    map.set(Token::GuarantorNationality, guarantor.nationality.as_str());
    map.set(Token::GuarantorRg, guarantor.rg.as_str());
    map.set(Token::GuarantorCpf, guarantor.cpf.as_str());
    map.set(Token::GuarantorBirthplace, guarantor.birthplace.as_str());

    map.set(Token::Rent, ctx.monthly_rent.as_str());
    map.set(
        Token::DueDay,
        ctx.due_day.map(|d| d.to_string()).unwrap_or_default(),
    );
    map.set(Token::StartDate, format_date(ctx.start_date));
    map.set(Token::EndDate, format_date(ctx.end_date));

    map
}

pub(crate) fn marital_word(status: Option<MaritalStatus>, translate: &dyn Translate) -> String {
    status
        .map(|s| translate.translate(s.code()))
        .unwrap_or_default()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
