//! HTML export
//!
//! Wraps assembled contract text in a printable A4 document with signature
//! blocks. The assembler output is plain text; all escaping happens here.

use handlebars::Handlebars;
use lease_types::{GenerationContext, PersonData};
use serde::Serialize;

use crate::error::Result;
use crate::i18n::Translations;

const CONTRACT_TEMPLATE: &str = "contract";

const CONTRACT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    @page { size: A4; margin: 40pt; }
    body { font-family: "Times New Roman", serif; font-size: 12pt; color: #000; line-height: 1.35; text-align: justify; }
    h1 { text-align: center; font-size: 16pt; margin-bottom: 18pt; font-family: Arial, sans-serif; }
    p { margin-bottom: 10pt; text-align: justify; }
    .date-location { text-align: center; margin: 24pt 0 40pt; font-weight: bold; }
    .signature-block { margin-top: 24pt; margin-bottom: 12pt; }
    .signature-line { margin-top: 30pt; border-bottom: 1px solid #000; height: 1pt; }
    .signature-title { font-weight: bold; margin-bottom: 12pt; }
    .witnesses { display: grid; grid-template-columns: 1fr 1fr; gap: 20pt; margin-top: 14pt; }
  </style>
</head>
<body>
<h1>{{title}}</h1>
{{#each paragraphs}}
<p>{{this}}</p>
{{/each}}
<div class="date-location"><p>{{uppercase city}} – {{uppercase state}}, _____ de _________________ de {{year}}</p></div>
{{#each signatures}}
<div class="signature-block">
  <div class="signature-title">{{title}}:</div>
  <div class="signature-line"></div>
  <div class="signature-name">{{uppercase name}}</div>
  <div class="signature-cpf">CPF: {{cpf}}</div>
</div>
{{/each}}
<div class="signature-block">
  <div class="signature-title">{{witnesses}}:</div>
  <div class="witnesses">
    <div><div class="signature-line"></div><div class="signature-cpf">CPF: _____________________</div></div>
    <div><div class="signature-line"></div><div class="signature-cpf">CPF: _____________________</div></div>
  </div>
</div>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct ContractView<'a> {
    title: &'a str,
    paragraphs: Vec<&'a str>,
    city: &'a str,
    state: &'a str,
    year: i32,
    signatures: Vec<SignatureView<'a>>,
    witnesses: &'a str,
}

#[derive(Debug, Serialize)]
struct SignatureView<'a> {
    title: &'a str,
    name: &'a str,
    cpf: &'a str,
}

impl<'a> SignatureView<'a> {
    fn new(title: &'a str, person: &'a PersonData) -> Self {
        Self {
            title,
            name: &person.name,
            cpf: &person.cpf,
        }
    }
}

/// Renders contracts to standalone HTML
pub struct HtmlExporter {
    handlebars: Handlebars<'static>,
    translations: Translations,
}

impl HtmlExporter {
    pub fn new(translations: Translations) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("uppercase", Box::new(uppercase_helper));
        handlebars.register_template_string(CONTRACT_TEMPLATE, CONTRACT_HTML)?;

        Ok(Self {
            handlebars,
            translations,
        })
    }

    /// Render `text` (assembler output) for the parties in `ctx`
    ///
    /// Each non-blank line becomes one paragraph. `year` goes into the
    /// signing line; day and month are left blank for handwriting.
    pub fn render(&self, text: &str, ctx: &GenerationContext, year: i32) -> Result<String> {
        let label = |key: &str| self.translations.get(key).unwrap_or("");

        let mut signatures = vec![
            SignatureView::new(label("landlord"), &ctx.landlord),
            SignatureView::new(label("tenant"), &ctx.tenant),
        ];
        if let Some(guarantor) = ctx.named_guarantor() {
            signatures.push(SignatureView::new(label("guarantor"), guarantor));
        }

        let city = ctx
            .property
            .city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&ctx.contract_location);

        let view = ContractView {
            title: label("contractTitle"),
            paragraphs: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
            city,
            state: ctx.property.state.as_deref().unwrap_or(""),
            year,
            signatures,
            witnesses: label("witnesses"),
        };

        Ok(self.handlebars.render(CONTRACT_TEMPLATE, &view)?)
    }
}

fn uppercase_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&handlebars::html_escape(&param.to_uppercase()))?;
    Ok(())
}
