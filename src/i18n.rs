//! User-facing labels for the supported languages.
//!
//! Every piece of text shown around an invoice or a shipment comes from a
//! [`Labels`] catalog. Command help and error messages stay in English.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Locale {
    En,
    #[default]
    Ca,
    Es,
    Fr,
    Pt,
}

pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca, Locale::Es, Locale::Fr, Locale::Pt];

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ca => "ca",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::Pt => "pt",
        }
    }

    /// Case-insensitive, tolerant of region tags (`pt-BR`, `es_ES`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        SUPPORTED_LOCALES.iter().copied().find(|l| l.as_str() == lang)
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Ca => &CA,
            Locale::Es => &ES,
            Locale::Fr => &FR,
            Locale::Pt => &PT,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| AppError::UnsupportedLanguage(s.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct Labels {
    pub invoice: &'static str,
    pub date: &'static str,
    pub client: &'static str,
    pub client_data: &'static str,
    pub fiscal_id: &'static str,
    pub phone: &'static str,
    pub concept: &'static str,
    pub price: &'static str,
    pub units: &'static str,
    pub discount: &'static str,
    pub vat: &'static str,
    pub net: &'static str,
    pub base: &'static str,
    pub total: &'static str,
    pub payment_method: &'static str,
    pub legal_notice: &'static str,
    pub unknown_client: &'static str,
    pub no_invoices: &'static str,
    pub title: &'static str,
    pub admin_title: &'static str,
    pub fetch_error: &'static str,
    pub fill_fields: &'static str,
    pub incorrect_data: &'static str,
    pub login_error: &'static str,
    pub welcome: &'static str,
    pub name: &'static str,
    pub company: &'static str,
    pub origin: &'static str,
    pub destination: &'static str,
    pub eta: &'static str,
    pub current_location: &'static str,
    pub status: &'static str,
    pub shipment_not_found: &'static str,
    pub tracking_fetch_error: &'static str,
    pub status_warehouse: &'static str,
    pub status_transit: &'static str,
    pub status_delivered: &'static str,
    pub status_unknown: &'static str,
}

static EN: Labels = Labels {
    invoice: "Invoice",
    date: "Date",
    client: "Client",
    client_data: "Client details",
    fiscal_id: "Tax ID",
    phone: "Phone",
    concept: "Description",
    price: "Price",
    units: "Units",
    discount: "Discount",
    vat: "VAT",
    net: "Net",
    base: "Taxable base",
    total: "Total",
    payment_method: "Payment method",
    legal_notice: "This invoice has been issued electronically and is valid without signature.",
    unknown_client: "Unknown client",
    no_invoices: "No invoices available.",
    title: "My invoices",
    admin_title: "All invoices",
    fetch_error: "Could not load your documents. Please try again later.",
    fill_fields: "Please fill in both user and password.",
    incorrect_data: "Incorrect user or password.",
    login_error: "Could not sign in right now. Please try again later.",
    welcome: "Welcome",
    name: "Name",
    company: "Company",
    origin: "Origin",
    destination: "Destination",
    eta: "Estimated arrival",
    current_location: "Current location",
    status: "Status",
    shipment_not_found: "No shipment found for tracking code",
    tracking_fetch_error: "Could not look up the shipment. Please try again later.",
    status_warehouse: "In warehouse",
    status_transit: "In transit",
    status_delivered: "Delivered",
    status_unknown: "Unknown",
};

static CA: Labels = Labels {
    invoice: "Factura",
    date: "Data",
    client: "Client",
    client_data: "Dades del client",
    fiscal_id: "NIF",
    phone: "Telèfon",
    concept: "Concepte",
    price: "Preu",
    units: "Unitats",
    discount: "Descompte",
    vat: "IVA",
    net: "Import",
    base: "Base imposable",
    total: "Total",
    payment_method: "Forma de pagament",
    legal_notice: "Aquesta factura s'ha emès electrònicament i és vàlida sense signatura.",
    unknown_client: "Client desconegut",
    no_invoices: "No hi ha factures disponibles.",
    title: "Les meves factures",
    admin_title: "Totes les factures",
    fetch_error: "No s'han pogut carregar els documents. Torna-ho a provar més tard.",
    fill_fields: "Omple l'usuari i la contrasenya.",
    incorrect_data: "Usuari o contrasenya incorrectes.",
    login_error: "No s'ha pogut iniciar la sessió. Torna-ho a provar més tard.",
    welcome: "Benvingut/da",
    name: "Nom",
    company: "Empresa",
    origin: "Origen",
    destination: "Destinació",
    eta: "Arribada prevista",
    current_location: "Ubicació actual",
    status: "Estat",
    shipment_not_found: "No s'ha trobat cap enviament amb el codi",
    tracking_fetch_error: "No s'ha pogut consultar l'enviament. Torna-ho a provar més tard.",
    status_warehouse: "En magatzem",
    status_transit: "En trànsit",
    status_delivered: "Lliurat",
    status_unknown: "Desconegut",
};

static ES: Labels = Labels {
    invoice: "Factura",
    date: "Fecha",
    client: "Cliente",
    client_data: "Datos del cliente",
    fiscal_id: "NIF",
    phone: "Teléfono",
    concept: "Concepto",
    price: "Precio",
    units: "Unidades",
    discount: "Descuento",
    vat: "IVA",
    net: "Importe",
    base: "Base imponible",
    total: "Total",
    payment_method: "Forma de pago",
    legal_notice: "Esta factura se ha emitido electrónicamente y es válida sin firma.",
    unknown_client: "Cliente desconocido",
    no_invoices: "No hay facturas disponibles.",
    title: "Mis facturas",
    admin_title: "Todas las facturas",
    fetch_error: "No se han podido cargar los documentos. Inténtalo más tarde.",
    fill_fields: "Rellena el usuario y la contraseña.",
    incorrect_data: "Usuario o contraseña incorrectos.",
    login_error: "No se ha podido iniciar sesión. Inténtalo más tarde.",
    welcome: "Bienvenido/a",
    name: "Nombre",
    company: "Empresa",
    origin: "Origen",
    destination: "Destino",
    eta: "Llegada prevista",
    current_location: "Ubicación actual",
    status: "Estado",
    shipment_not_found: "No se ha encontrado ningún envío con el código",
    tracking_fetch_error: "No se ha podido consultar el envío. Inténtalo más tarde.",
    status_warehouse: "En almacén",
    status_transit: "En tránsito",
    status_delivered: "Entregado",
    status_unknown: "Desconocido",
};

static FR: Labels = Labels {
    invoice: "Facture",
    date: "Date",
    client: "Client",
    client_data: "Coordonnées du client",
    fiscal_id: "N° TVA",
    phone: "Téléphone",
    concept: "Désignation",
    price: "Prix",
    units: "Quantité",
    discount: "Remise",
    vat: "TVA",
    net: "Montant HT",
    base: "Total HT",
    total: "Total TTC",
    payment_method: "Mode de paiement",
    legal_notice: "Cette facture a été émise électroniquement et est valable sans signature.",
    unknown_client: "Client inconnu",
    no_invoices: "Aucune facture disponible.",
    title: "Mes factures",
    admin_title: "Toutes les factures",
    fetch_error: "Impossible de charger vos documents. Réessayez plus tard.",
    fill_fields: "Veuillez saisir l'utilisateur et le mot de passe.",
    incorrect_data: "Utilisateur ou mot de passe incorrect.",
    login_error: "Connexion impossible pour le moment. Réessayez plus tard.",
    welcome: "Bienvenue",
    name: "Nom",
    company: "Société",
    origin: "Origine",
    destination: "Destination",
    eta: "Arrivée prévue",
    current_location: "Position actuelle",
    status: "Statut",
    shipment_not_found: "Aucun envoi trouvé pour le code",
    tracking_fetch_error: "Impossible de consulter l'envoi. Réessayez plus tard.",
    status_warehouse: "En entrepôt",
    status_transit: "En transit",
    status_delivered: "Livré",
    status_unknown: "Inconnu",
};

static PT: Labels = Labels {
    invoice: "Fatura",
    date: "Data",
    client: "Cliente",
    client_data: "Dados do cliente",
    fiscal_id: "NIF",
    phone: "Telefone",
    concept: "Descrição",
    price: "Preço",
    units: "Unidades",
    discount: "Desconto",
    vat: "IVA",
    net: "Valor",
    base: "Base tributável",
    total: "Total",
    payment_method: "Forma de pagamento",
    legal_notice: "Esta fatura foi emitida eletronicamente e é válida sem assinatura.",
    unknown_client: "Cliente desconhecido",
    no_invoices: "Não há faturas disponíveis.",
    title: "As minhas faturas",
    admin_title: "Todas as faturas",
    fetch_error: "Não foi possível carregar os documentos. Tente novamente mais tarde.",
    fill_fields: "Preencha o utilizador e a palavra-passe.",
    incorrect_data: "Utilizador ou palavra-passe incorretos.",
    login_error: "Não foi possível iniciar sessão. Tente novamente mais tarde.",
    welcome: "Bem-vindo/a",
    name: "Nome",
    company: "Empresa",
    origin: "Origem",
    destination: "Destino",
    eta: "Chegada prevista",
    current_location: "Localização atual",
    status: "Estado",
    shipment_not_found: "Nenhum envio encontrado com o código",
    tracking_fetch_error: "Não foi possível consultar o envio. Tente novamente mais tarde.",
    status_warehouse: "Em armazém",
    status_transit: "Em trânsito",
    status_delivered: "Entregue",
    status_unknown: "Desconhecido",
};
