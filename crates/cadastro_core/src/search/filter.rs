use crate::mask::cpf_cnpj_mask_for;
use crate::model::cliente::Cliente;

/// One row of the client selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClienteSummary {
    pub id_cliente: String,
    /// `"<id> - <nome>"`.
    pub title: String,
    /// `"CPF/CNPJ: <masked>"`.
    pub caption: String,
}

impl From<&Cliente> for ClienteSummary {
    fn from(cliente: &Cliente) -> Self {
        let document = match cpf_cnpj_mask_for(cliente.cpf_cnpj.chars().count()) {
            Some(mask) => mask.format(&cliente.cpf_cnpj),
            None => cliente.cpf_cnpj.clone(),
        };
        Self {
            id_cliente: cliente.id_cliente.clone(),
            title: format!("{} - {}", cliente.id_cliente, cliente.nome),
            caption: format!("CPF/CNPJ: {document}"),
        }
    }
}

/// Filters `clientes` for the selection list.
///
/// Falls back to the full list when nothing matches, so the list never goes
/// blank while the operator types.
pub fn filter_clientes<'a>(clientes: &'a [Cliente], query: &str) -> Vec<&'a Cliente> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return clientes.iter().collect();
    }

    let matched = clientes
        .iter()
        .filter(|cliente| {
            cliente.nome.to_lowercase().contains(&needle)
                || cliente.id_cliente.to_lowercase().contains(&needle)
        })
        .collect::<Vec<_>>();

    if matched.is_empty() {
        clientes.iter().collect()
    } else {
        matched
    }
}
