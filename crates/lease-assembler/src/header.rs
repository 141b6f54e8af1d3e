//! Party identification header
//!
//! Written directly from the context. Token substitution plays no part here.

use lease_types::{GenerationContext, PersonData};

use crate::token::marital_word;
use crate::translate::Translate;

const INTRO: &str = "Pelo presente instrumento particular de locação residencial, \
as partes abaixo qualificadas têm entre si, justo e contratado, o que se segue:";

/// Role a party plays in the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Landlord,
    Tenant,
    Guarantor,
}

impl PartyRole {
    pub fn label(&self) -> &'static str {
        match self {
            PartyRole::Landlord => "LOCADOR",
            PartyRole::Tenant => "LOCATÁRIO",
            PartyRole::Guarantor => "FIADOR",
        }
    }
}

/// Header paragraphs: intro, landlord, tenant and, when named, guarantor
pub fn build_header(ctx: &GenerationContext, translate: &dyn Translate) -> Vec<String> {
    let mut paragraphs = vec![
        INTRO.to_string(),
        party_paragraph(PartyRole::Landlord, &ctx.landlord, translate),
        party_paragraph(PartyRole::Tenant, &ctx.tenant, translate),
    ];
    if let Some(guarantor) = ctx.named_guarantor() {
        paragraphs.push(party_paragraph(PartyRole::Guarantor, guarantor, translate));
    }
    paragraphs
}

/// One qualification paragraph, e.g.
/// `LOCATÁRIO: Maria Silva, brasileira, solteiro(a), portador(a) do RG nº 12, inscrito(a) no CPF sob o nº 34.`
///
/// Blank fields are left out rather than rendered empty.
pub fn party_paragraph(role: PartyRole, person: &PersonData, translate: &dyn Translate) -> String {
    let mut parts: Vec<String> = Vec::new();

    push_nonblank(&mut parts, person.name.trim());
    push_nonblank(&mut parts, person.nationality.trim());
    push_nonblank(&mut parts, &marital_word(person.marital_status, translate));
    if !person.rg.trim().is_empty() {
        parts.push(format!("portador(a) do RG nº {}", person.rg.trim()));
    }
    if !person.cpf.trim().is_empty() {
        parts.push(format!("inscrito(a) no CPF sob o nº {}", person.cpf.trim()));
    }
    if !person.birthplace.trim().is_empty() {
        parts.push(format!("natural de {}", person.birthplace.trim()));
    }

    if parts.is_empty() {
        format!("{}:", role.label())
    } else {
        format!("{}: {}.", role.label(), parts.join(", "))
    }
}

fn push_nonblank(parts: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        parts.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MaritalStatusWords;
    use lease_types::MaritalStatus;

    fn words() -> MaritalStatusWords {
        MaritalStatusWords::portuguese()
    }

    #[test]
    fn test_full_paragraph() {
        let person = PersonData {
            name: "Maria Silva".into(),
            nationality: "brasileira".into(),
            marital_status: Some(MaritalStatus::Single),
            rg: "12.345".into(),
            cpf: "111.222.333-44".into(),
            birthplace: "Salvador/BA".into(),
        };
        assert_eq!(
            party_paragraph(PartyRole::Tenant, &person, &words()),
            "LOCATÁRIO: Maria Silva, brasileira, solteiro(a), portador(a) do RG nº 12.345, \
             inscrito(a) no CPF sob o nº 111.222.333-44, natural de Salvador/BA."
        );
    }

    #[test]
    fn test_blank_fields_omitted() {
        let person = PersonData {
            name: "João".into(),
            cpf: "999".into(),
            ..Default::default()
        };
        assert_eq!(
            party_paragraph(PartyRole::Landlord, &person, &words()),
            "LOCADOR: João, inscrito(a) no CPF sob o nº 999."
        );
        assert_eq!(
            party_paragraph(PartyRole::Landlord, &PersonData::default(), &words()),
            "LOCADOR:"
        );
    }

    #[test]
    fn test_guarantor_only_when_named() {
        let mut ctx = GenerationContext::default();
        assert_eq!(build_header(&ctx, &words()).len(), 3);

        ctx.guarantor = Some(PersonData::default());
        assert_eq!(build_header(&ctx, &words()).len(), 3);

        ctx.guarantor = Some(PersonData {
            name: "Carlos".into(),
            cpf: "555".into(),
            ..Default::default()
        });
        let header = build_header(&ctx, &words());
        assert_eq!(header.len(), 4);
        assert!(header[3].starts_with("FIADOR: Carlos"));
        assert!(header[3].contains("555"));
    }
}
