use serde::Deserialize;
use std::fs;

/// One instrument: provider ticker plus the friendly name used in output
/// column names. Kept as a list (not a map) so substitution order stays
/// deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerAlias {
    pub symbol: String,
    pub friendly_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Tickers fetched on every run.
    pub tickers: Vec<String>,
    /// Symbol -> friendly name aliases applied during column standardization.
    pub ticker_map: Vec<TickerAlias>,
    pub db_path: String,
    pub table_name: String,
    /// Used when --start-date is not given on the command line.
    pub default_start_date: String,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl Default for AppConfig {
    fn default() -> Self {
        let aliases = [
            ("^BVSP", "ibovespa"),
            ("VALE3.SA", "vale"),
            ("PETR3.SA", "petrobras_pn"),
            ("PETR4.SA", "petrobras"),
            ("ITUB4.SA", "itau_unibanco"),
            ("BBDC4.SA", "bradesco_pn"),
            ("B3SA3.SA", "b3"),
            ("ABEV3.SA", "ambev"),
            ("BBAS3.SA", "banco_do_brasil"),
            ("WEGE3.SA", "weg"),
            ("RENT3.SA", "localiza"),
            ("SUZB3.SA", "suzano"),
            ("ELET3.SA", "eletrobras"),
            ("ELET6.SA", "eletrobras_pfb"),
            ("GGBR4.SA", "gerdau_pn"),
            ("JBSS3.SA", "jbs"),
            ("RAIL3.SA", "rumo"),
            ("HAPV3.SA", "hapvida"),
            ("LREN3.SA", "lojas_renner"),
            ("RADL3.SA", "raia_drogasil"),
            ("CSAN3.SA", "cosan"),
            ("VIVT3.SA", "telefonica_brasil"),
            ("BPAC11.SA", "btg_pactual"),
            ("EQTL3.SA", "equatorial"),
            ("BRFS3.SA", "brf"),
            ("UGPA3.SA", "ultrapar"),
            ("CCRO3.SA", "ccr"),
            ("KLBN11.SA", "klabin"),
            ("SBSP3.SA", "sabesp"),
            ("TOTS3.SA", "totvs"),
            ("MGLU3.SA", "magazine_luiza"),
            ("ENGI11.SA", "energisa"),
            ("EMBR3.SA", "embraer"),
            ("AZUL4.SA", "azul"),
            ("CYRE3.SA", "cyrela"),
            ("NTCO3.SA", "natura"),
            ("QUAL3.SA", "qualicorp"),
            ("GOAU4.SA", "metalurgica_gerdau"),
            ("CMIG4.SA", "cemig"),
            ("BBDC3.SA", "bradesco"),
            ("ITSA4.SA", "itausa"),
            ("SANB11.SA", "santander_br"),
            ("TAEE11.SA", "taesa"),
            ("BRAP4.SA", "bradespar"),
            ("USIM5.SA", "usiminas"),
            ("CSNA3.SA", "csn"),
            ("MRFG3.SA", "marfrig"),
            ("GOLL4.SA", "gol"),
            ("PCAR3.SA", "pao_de_acucar"),
            ("MRVE3.SA", "mrv"),
            ("ECOR3.SA", "ecorodovias"),
            ("YDUQ3.SA", "yduqs"),
            ("COGN3.SA", "cogna"),
            ("CVCB3.SA", "cvc"),
            ("IRBR3.SA", "irb_brasil"),
            ("HYPE3.SA", "hypera"),
            ("DXCO3.SA", "dexco"),
            ("BEEF3.SA", "minerva"),
            ("BRKM5.SA", "braskem"),
            ("CRFB3.SA", "carrefour_br"),
            ("PRIO3.SA", "petro_rio"),
            ("RRRP3.SA", "3r_petroleum"),
            ("ALPA4.SA", "alpacruz"),
            ("CPLE6.SA", "copel"),
            ("CPFE3.SA", "cpfl_energia"),
            ("ENEV3.SA", "eneva"),
            ("EGIE3.SA", "engie_brasil"),
            ("FLRY3.SA", "fleury"),
            ("GNDI3.SA", "intermedica"),
            ("LWSA3.SA", "locaweb"),
            ("SOMA3.SA", "grupo_soma"),
            ("VAMO3.SA", "vamos"),
            ("USDBRL=X", "dolar"),
            ("^GSPC", "sp500"),
            ("CL=F", "petroleo_brent"),
        ];

        AppConfig {
            tickers: vec![
                "^BVSP".into(),
                "USDBRL=X".into(),
                "^GSPC".into(),
                "CL=F".into(),
                "PETR4.SA".into(),
            ],
            ticker_map: aliases
                .iter()
                .map(|(symbol, friendly_name)| TickerAlias {
                    symbol: (*symbol).into(),
                    friendly_name: (*friendly_name).into(),
                })
                .collect(),
            db_path: "data/mercados.db".into(),
            table_name: "precos_diarios".into(),
            default_start_date: "2005-01-01".into(),
        }
    }
}
