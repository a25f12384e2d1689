//! Client record model.
//!
//! # Responsibility
//! - Define the record shape shared by the form, the validator and the store.
//! - Offer "with X replaced" updates so callers never mutate shared state.
//!
//! # Invariants
//! - JSON field names match the persisted file (`idCliente`, `cpfCnpj`, ...).
//! - Missing fields deserialize to their defaults; no schema version exists.
//! - Consumer units and inverters are append-only while editing.

use crate::mask::InputRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field key to human-readable validation message.
pub type FieldErrors = BTreeMap<String, String>;

/// Maximum raw digits accepted by `idCliente`.
pub const ID_CLIENTE_MAX_DIGITS: usize = 6;
/// Maximum raw digits accepted by `cpfCnpj` (CNPJ length).
pub const CPF_CNPJ_MAX_DIGITS: usize = 14;
/// Maximum raw digits accepted by date fields (`DDMMYYYY`).
pub const DATE_MAX_DIGITS: usize = 8;

/// Customer record tied to a micro-generation homologation process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cliente {
    /// Upsert key. Digits only, up to six characters.
    pub id_cliente: String,
    pub nome: String,
    /// Raw digits: 11 for CPF, 14 for CNPJ.
    pub cpf_cnpj: String,
    pub e_mail: String,
    /// Raw `DDMMYYYY` digits, displayed as `DD/MM/YYYY`.
    pub data_nascimento: String,
    pub data_requisicao_protocolo: String,
    pub data_entrada_projeto: String,
    pub data_aprovacao_projeto: String,
    pub data_requisicao_vistoria: String,
    pub data_aprovacao_vistoria: String,
    pub protocolo: String,
    pub trt_cft: String,
    pub unidade_consumidora: Vec<UnidadeConsumidora>,
    pub login_celesc: String,
    pub senha_celesc: String,
    pub inversores: Vec<Inversor>,
    /// Derived by validation. Never the source of truth.
    pub errors: FieldErrors,
}

impl Default for Cliente {
    fn default() -> Self {
        Self {
            id_cliente: String::new(),
            nome: String::new(),
            cpf_cnpj: String::new(),
            e_mail: String::new(),
            data_nascimento: String::new(),
            data_requisicao_protocolo: String::new(),
            data_entrada_projeto: String::new(),
            data_aprovacao_projeto: String::new(),
            data_requisicao_vistoria: String::new(),
            data_aprovacao_vistoria: String::new(),
            protocolo: String::new(),
            trt_cft: String::new(),
            unidade_consumidora: vec![UnidadeConsumidora::default()],
            login_celesc: String::new(),
            senha_celesc: String::new(),
            inversores: vec![Inversor::default()],
            errors: FieldErrors::new(),
        }
    }
}

/// Consumer unit ("UC") registered with the utility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnidadeConsumidora {
    pub numero: String,
}

/// Inverter equipment installed for the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inversor {
    pub marca: String,
    /// Power rating as typed by the operator; absent in older files.
    pub potencia: String,
    /// Serial number.
    pub sn: String,
    pub login: String,
    pub senha: String,
}

/// Editable scalar fields of [`Cliente`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClienteField {
    IdCliente,
    Nome,
    CpfCnpj,
    EMail,
    DataNascimento,
    DataRequisicaoProtocolo,
    DataEntradaProjeto,
    DataAprovacaoProjeto,
    DataRequisicaoVistoria,
    DataAprovacaoVistoria,
    Protocolo,
    TrtCft,
    LoginCelesc,
    SenhaCelesc,
}

impl ClienteField {
    pub const ALL: [ClienteField; 14] = [
        Self::IdCliente,
        Self::Nome,
        Self::CpfCnpj,
        Self::EMail,
        Self::DataNascimento,
        Self::DataRequisicaoProtocolo,
        Self::DataEntradaProjeto,
        Self::DataAprovacaoProjeto,
        Self::DataRequisicaoVistoria,
        Self::DataAprovacaoVistoria,
        Self::Protocolo,
        Self::TrtCft,
        Self::LoginCelesc,
        Self::SenhaCelesc,
    ];

    /// Stable key shared by the JSON file and the error mapping.
    pub fn key(self) -> &'static str {
        match self {
            Self::IdCliente => "idCliente",
            Self::Nome => "nome",
            Self::CpfCnpj => "cpfCnpj",
            Self::EMail => "eMail",
            Self::DataNascimento => "dataNascimento",
            Self::DataRequisicaoProtocolo => "dataRequisicaoProtocolo",
            Self::DataEntradaProjeto => "dataEntradaProjeto",
            Self::DataAprovacaoProjeto => "dataAprovacaoProjeto",
            Self::DataRequisicaoVistoria => "dataRequisicaoVistoria",
            Self::DataAprovacaoVistoria => "dataAprovacaoVistoria",
            Self::Protocolo => "protocolo",
            Self::TrtCft => "trtCft",
            Self::LoginCelesc => "loginCelesc",
            Self::SenhaCelesc => "senhaCelesc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Returns whether the field stores raw `DDMMYYYY` digits.
    pub fn is_date(self) -> bool {
        matches!(
            self,
            Self::DataNascimento
                | Self::DataRequisicaoProtocolo
                | Self::DataEntradaProjeto
                | Self::DataAprovacaoProjeto
                | Self::DataRequisicaoVistoria
                | Self::DataAprovacaoVistoria
        )
    }

    /// Input filter applied to raw keystrokes before the record is updated.
    pub fn input_rule(self) -> InputRule {
        match self {
            Self::IdCliente => InputRule::Digits {
                max: Some(ID_CLIENTE_MAX_DIGITS),
            },
            Self::CpfCnpj => InputRule::Digits {
                max: Some(CPF_CNPJ_MAX_DIGITS),
            },
            Self::Protocolo => InputRule::Digits { max: None },
            field if field.is_date() => InputRule::Digits {
                max: Some(DATE_MAX_DIGITS),
            },
            _ => InputRule::Free,
        }
    }
}

/// Editable fields of [`Inversor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InversorField {
    Marca,
    Potencia,
    Sn,
    Login,
    Senha,
}

impl InversorField {
    pub fn key(self) -> &'static str {
        match self {
            Self::Marca => "marca",
            Self::Potencia => "potencia",
            Self::Sn => "sn",
            Self::Login => "login",
            Self::Senha => "senha",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [
            Self::Marca,
            Self::Potencia,
            Self::Sn,
            Self::Login,
            Self::Senha,
        ]
        .into_iter()
        .find(|field| field.key() == key)
    }
}

/// Index-based edit targeting a sub-record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    UnidadeOutOfRange { index: usize, len: usize },
    InversorOutOfRange { index: usize, len: usize },
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnidadeOutOfRange { index, len } => {
                write!(f, "consumer unit index {index} out of range (len {len})")
            }
            Self::InversorOutOfRange { index, len } => {
                write!(f, "inverter index {index} out of range (len {len})")
            }
        }
    }
}

impl Error for EditError {}

/// Reserved error key for one consumer unit card.
///
/// No validation rule produces it yet; the UI looks it up per card.
pub fn unidade_error_key(index: usize) -> String {
    format!("uc{index}")
}

impl Cliente {
    /// Reads one scalar field.
    pub fn field(&self, field: ClienteField) -> &str {
        match field {
            ClienteField::IdCliente => &self.id_cliente,
            ClienteField::Nome => &self.nome,
            ClienteField::CpfCnpj => &self.cpf_cnpj,
            ClienteField::EMail => &self.e_mail,
            ClienteField::DataNascimento => &self.data_nascimento,
            ClienteField::DataRequisicaoProtocolo => &self.data_requisicao_protocolo,
            ClienteField::DataEntradaProjeto => &self.data_entrada_projeto,
            ClienteField::DataAprovacaoProjeto => &self.data_aprovacao_projeto,
            ClienteField::DataRequisicaoVistoria => &self.data_requisicao_vistoria,
            ClienteField::DataAprovacaoVistoria => &self.data_aprovacao_vistoria,
            ClienteField::Protocolo => &self.protocolo,
            ClienteField::TrtCft => &self.trt_cft,
            ClienteField::LoginCelesc => &self.login_celesc,
            ClienteField::SenhaCelesc => &self.senha_celesc,
        }
    }

    /// Returns a copy with one scalar field replaced verbatim.
    ///
    /// Input filtering is the caller's job; see [`ClienteField::input_rule`].
    pub fn with_field(&self, field: ClienteField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.field_mut(field) = value.into();
        next
    }

    /// Returns a copy with a default consumer unit appended.
    pub fn with_unidade_added(&self) -> Self {
        let mut next = self.clone();
        next.unidade_consumidora.push(UnidadeConsumidora::default());
        next
    }

    /// Returns a copy with the consumer unit at `index` renumbered.
    pub fn with_unidade_numero(
        &self,
        index: usize,
        numero: impl Into<String>,
    ) -> Result<Self, EditError> {
        let len = self.unidade_consumidora.len();
        let mut next = self.clone();
        let unidade = next
            .unidade_consumidora
            .get_mut(index)
            .ok_or(EditError::UnidadeOutOfRange { index, len })?;
        unidade.numero = numero.into();
        Ok(next)
    }

    /// Returns a copy with a default inverter appended.
    pub fn with_inversor_added(&self) -> Self {
        let mut next = self.clone();
        next.inversores.push(Inversor::default());
        next
    }

    /// Returns a copy with one field of the inverter at `index` replaced.
    pub fn with_inversor_field(
        &self,
        index: usize,
        field: InversorField,
        value: impl Into<String>,
    ) -> Result<Self, EditError> {
        let len = self.inversores.len();
        let mut next = self.clone();
        let inversor = next
            .inversores
            .get_mut(index)
            .ok_or(EditError::InversorOutOfRange { index, len })?;
        let slot = match field {
            InversorField::Marca => &mut inversor.marca,
            InversorField::Potencia => &mut inversor.potencia,
            InversorField::Sn => &mut inversor.sn,
            InversorField::Login => &mut inversor.login,
            InversorField::Senha => &mut inversor.senha,
        };
        *slot = value.into();
        Ok(next)
    }

    /// Returns a copy carrying the given validation errors.
    pub fn with_errors(&self, errors: FieldErrors) -> Self {
        Self {
            errors,
            ..self.clone()
        }
    }

    /// Returns the validation message for a field key, if any.
    pub fn error_for(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    fn field_mut(&mut self, field: ClienteField) -> &mut String {
        match field {
            ClienteField::IdCliente => &mut self.id_cliente,
            ClienteField::Nome => &mut self.nome,
            ClienteField::CpfCnpj => &mut self.cpf_cnpj,
            ClienteField::EMail => &mut self.e_mail,
            ClienteField::DataNascimento => &mut self.data_nascimento,
            ClienteField::DataRequisicaoProtocolo => &mut self.data_requisicao_protocolo,
            ClienteField::DataEntradaProjeto => &mut self.data_entrada_projeto,
            ClienteField::DataAprovacaoProjeto => &mut self.data_aprovacao_projeto,
            ClienteField::DataRequisicaoVistoria => &mut self.data_requisicao_vistoria,
            ClienteField::DataAprovacaoVistoria => &mut self.data_aprovacao_vistoria,
            ClienteField::Protocolo => &mut self.protocolo,
            ClienteField::TrtCft => &mut self.trt_cft,
            ClienteField::LoginCelesc => &mut self.login_celesc,
            ClienteField::SenhaCelesc => &mut self.senha_celesc,
        }
    }
}
