//! Behavioral properties of the assembled contract text

use chrono::NaiveDate;
use lease_assembler::{format_contract, substitute, Token, TokenMap, MaritalStatusWords};
use lease_types::{Clause, ContractTemplate, GenerationContext, MaritalStatus, PersonData, PropertyData};
use proptest::prelude::*;

fn words() -> MaritalStatusWords {
    MaritalStatusWords::portuguese()
}

fn sample_context() -> GenerationContext {
    GenerationContext {
        landlord: PersonData {
            name: "José Almeida".into(),
            nationality: "brasileiro".into(),
            marital_status: Some(MaritalStatus::Married),
            rg: "1234567".into(),
            cpf: "123.456.789-00".into(),
            birthplace: "Feira de Santana/BA".into(),
        },
        tenant: PersonData {
            name: "Maria Silva".into(),
            cpf: "987.654.321-00".into(),
            ..Default::default()
        },
        property: PropertyData {
            description: "casa".into(),
            street: "Rua das Flores".into(),
            number: "42".into(),
            zip_code: "40000-000".into(),
            neighborhood: "Centro".into(),
            city: Some("Salvador".into()),
            state: Some("BA".into()),
            ..Default::default()
        },
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        end_date: NaiveDate::from_ymd_opt(2025, 12, 31),
        monthly_rent: "1500,00".into(),
        due_day: Some(5),
        contract_location: "Salvador".into(),
        ..Default::default()
    }
}

#[test]
fn rent_clause_example() {
    let clauses = vec![Clause::new(
        "rent",
        "Aluguel",
        "O aluguel é de R$ {RENT}, pago até o dia {DUE_DAY}.",
    )];
    let ctx = sample_context().with_template(ContractTemplate::new("t", "Padrão", ["rent"]));

    let text = format_contract(&ctx, &clauses, &words());
    assert!(text.contains("CLÁUSULA PRIMEIRA: O aluguel é de R$ 1500,00, pago até o dia 5."));
}

#[test]
fn missing_template_returns_empty() {
    let clauses = vec![Clause::new("a", "A", "{TENANT}")];
    assert_eq!(format_contract(&sample_context(), &clauses, &words()), "");
}

#[test]
fn dangling_reference_among_valid_ones() {
    let clauses = vec![
        Clause::new("a", "A", "um"),
        Clause::new("b", "B", "dois"),
        Clause::new("c", "C", "três"),
    ];
    let ctx = sample_context().with_template(ContractTemplate::new("t", "T", ["a", "deleted", "c"]));
    let text = format_contract(&ctx, &clauses, &words());

    assert_eq!(text.matches("CLÁUSULA ").count(), 2);
    assert!(text.contains("CLÁUSULA PRIMEIRA: um"));
    assert!(text.contains("CLÁUSULA SEGUNDA: três"));
    assert!(!text.contains("dois"));
}

#[test]
fn guarantor_paragraph_only_when_named() {
    let clauses = vec![Clause::new("a", "A", "texto")];
    let template = ContractTemplate::new("t", "T", ["a"]).with_guarantor();

    let without = sample_context().with_template(template.clone());
    let text = format_contract(&without, &clauses, &words());
    assert!(!text.split("\n\n").any(|p| p.starts_with("FIADOR")));

    let mut blank = without.clone();
    blank.guarantor = Some(PersonData {
        cpf: "000".into(),
        ..Default::default()
    });
    let text = format_contract(&blank, &clauses, &words());
    assert!(!text.split("\n\n").any(|p| p.starts_with("FIADOR")));

    let mut with = without;
    with.guarantor = Some(PersonData {
        name: "Carlos Souza".into(),
        cpf: "111.111.111-11".into(),
        ..Default::default()
    });
    let text = format_contract(&with, &clauses, &words());
    let guarantor: Vec<_> = text.split("\n\n").filter(|p| p.starts_with("FIADOR")).collect();
    assert_eq!(guarantor.len(), 1);
    assert!(guarantor[0].contains("Carlos Souza"));
    assert!(guarantor[0].contains("111.111.111-11"));
}

#[test]
fn header_uses_translated_marital_status() {
    let ctx = sample_context().with_template(ContractTemplate::new("t", "T", Vec::<String>::new()));
    let text = format_contract(&ctx, &[], &words());
    assert!(text.contains("LOCADOR: José Almeida, brasileiro, casado(a)"));
    assert!(!text.contains("married"));
}

#[test]
fn all_property_tokens_substituted() {
    let clauses = vec![Clause::new(
        "obj",
        "Objeto",
        "Uma {PROPERTY} na Rua [STREET] nº ${NUMBER}, {NEIGHBORHOOD}, {CITY}/{STATE}, CEP {ZIPCODE}, \
         de {START_DATE} a {END_DATE}.",
    )];
    let ctx = sample_context().with_template(ContractTemplate::new("t", "T", ["obj"]));
    let text = format_contract(&ctx, &clauses, &words());
    assert!(text.ends_with(
        "CLÁUSULA PRIMEIRA: Uma casa na Rua Rua das Flores nº 42, Centro, Salvador/BA, CEP 40000-000, \
         de 01/01/2025 a 31/12/2025."
    ));
}

fn clause_body() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        "[a-zA-Z ,.]{0,12}",
        Just("{TENANT}".to_string()),
        Just("[RENT]".to_string()),
        Just("${LANDLORD}".to_string()),
        Just("TENANT".to_string()),
        Just("{UNKNOWN}".to_string()),
        Just("{".to_string()),
        Just("$".to_string()),
        Just("]".to_string()),
    ];
    prop::collection::vec(pieces, 0..12).prop_map(|v| v.concat())
}

proptest! {
    #[test]
    fn output_is_deterministic(bodies in prop::collection::vec(clause_body(), 0..25)) {
        let clauses: Vec<Clause> = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| Clause::new(format!("c{i}"), "T", b.clone()))
            .collect();
        let ids: Vec<String> = clauses.iter().map(|c| c.id.clone()).collect();
        let ctx = sample_context().with_template(ContractTemplate::new("t", "T", ids));

        let first = format_contract(&ctx, &clauses, &words());
        let second = format_contract(&ctx, &clauses, &words());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.matches("CLÁUSULA ").count(), clauses.len());
    }

    #[test]
    fn no_vocabulary_placeholder_survives(body in clause_body()) {
        let mut tokens = TokenMap::empty();
        tokens.set(Token::Tenant, "Maria");
        tokens.set(Token::Rent, "900");
        tokens.set(Token::Landlord, "José");
        let out = substitute(&body, &tokens);
        prop_assert!(!out.contains("{TENANT}"), "tenant placeholder left in {:?}", out);
        prop_assert!(!out.contains("[RENT]"), "rent placeholder left in {:?}", out);
        prop_assert!(!out.contains("${LANDLORD}"), "landlord placeholder left in {:?}", out);
    }

    #[test]
    fn text_without_openers_is_unchanged(body in "[a-zA-Z0-9 ,.\\n]{0,64}") {
        let mut tokens = TokenMap::empty();
        tokens.set(Token::Tenant, "Maria");
        prop_assert_eq!(substitute(&body, &tokens), body);
    }
}
