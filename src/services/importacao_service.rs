// src/services/importacao_service.rs
//
// Importação do arquivo de estrutura de equipes exportado do ERP. O parse
// é puro (bytes -> linhas interpretadas); a persistência arquiva o cadastro
// inteiro no histórico e depois aplica o upsert por matrícula, tudo dentro
// de uma única transação.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::EletricistaRepository,
    models::auth::Usuario,
    models::importacao::{
        COLUNA_COLABORADOR, COLUNA_MATRICULA, COLUNAS_OPCIONAIS, LinhaEstrutura,
        ResultadoImportacao,
    },
};

// Arquivos do ERP chegam ora em UTF-8, ora em Latin-1. Tenta UTF-8 primeiro;
// se falhar, decodifica byte a byte (Latin-1 mapeia 1:1 nos code points).
pub fn decodificar_conteudo(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(texto) => texto.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn normalizar_cabecalho(nome: &str) -> String {
    nome.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn celula(registro: &csv::StringRecord, indice: Option<usize>) -> Option<String> {
    indice
        .and_then(|i| registro.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Interpreta o CSV (separador ';', com cabeçalho). Linhas sem matrícula ou
// sem colaborador são puladas, não abortam a importação.
pub fn ler_linhas_estrutura(conteudo: &str) -> Result<Vec<LinhaEstrutura>, AppError> {
    let mut leitor = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(conteudo.as_bytes());

    let cabecalhos = leitor
        .headers()
        .map_err(|e| AppError::DataInvalida(format!("Arquivo de estrutura ilegível: {e}")))?
        .clone();

    let mut indices: HashMap<String, usize> = HashMap::new();
    for (i, nome) in cabecalhos.iter().enumerate() {
        indices.insert(normalizar_cabecalho(nome), i);
    }

    if !indices.contains_key(COLUNA_MATRICULA) || !indices.contains_key(COLUNA_COLABORADOR) {
        return Err(AppError::DataInvalida(format!(
            "O arquivo precisa das colunas '{COLUNA_MATRICULA}' e '{COLUNA_COLABORADOR}'."
        )));
    }

    let mut linhas = Vec::new();
    for registro in leitor.records() {
        let registro =
            registro.map_err(|e| AppError::DataInvalida(format!("Linha ilegível: {e}")))?;

        let matricula = celula(&registro, indices.get(COLUNA_MATRICULA).copied());
        let colaborador = celula(&registro, indices.get(COLUNA_COLABORADOR).copied());
        let (Some(matricula), Some(colaborador)) = (matricula, colaborador) else {
            continue;
        };

        let mut linha = LinhaEstrutura {
            matricula,
            colaborador,
            ..Default::default()
        };
        for coluna in COLUNAS_OPCIONAIS {
            let valor = celula(&registro, indices.get(coluna).copied());
            match coluna {
                "regional" => linha.regional = valor,
                "polo" => linha.polo = valor,
                "base" => linha.base = valor,
                "prefixo" => linha.prefixo = valor,
                "descr_secao" => linha.descr_secao = valor,
                "descr_situacao" => linha.descr_situacao = valor,
                "placas" => linha.placas = valor,
                "tipo_equipe" => linha.tipo_equipe = valor,
                "processo_equipe" => linha.processo_equipe = valor,
                "superv_campo" => linha.superv_campo = valor,
                "superv_operacao" => linha.superv_operacao = valor,
                "coordenador" => linha.coordenador = valor,
                _ => {}
            }
        }
        linhas.push(linha);
    }

    Ok(linhas)
}

#[derive(Clone)]
pub struct ImportacaoService {
    eletricista_repo: EletricistaRepository,
    pool: PgPool,
}

impl ImportacaoService {
    pub fn new(eletricista_repo: EletricistaRepository, pool: PgPool) -> Self {
        Self { eletricista_repo, pool }
    }

    // Arquiva o cadastro vivo e aplica o arquivo por cima. O upsert preserva
    // o id de quem já existe, então os registros diários antigos continuam
    // apontando para a mesma pessoa.
    pub async fn importar_estrutura(
        &self,
        usuario: &Usuario,
        nome_arquivo: &str,
        bytes: &[u8],
    ) -> Result<ResultadoImportacao, AppError> {
        let conteudo = decodificar_conteudo(bytes);
        let linhas = ler_linhas_estrutura(&conteudo)?;

        let mut tx = self.pool.begin().await?;

        // O arquivamento é incondicional: acontece antes de qualquer escrita,
        // mesmo que o arquivo não traga nenhuma linha válida
        if linhas.is_empty() {
            tracing::warn!("Arquivo {} sem linhas válidas; só arquivando", nome_arquivo);
        }
        let observacao = format!("Importação do arquivo {nome_arquivo}");
        let arquivados = self
            .eletricista_repo
            .archive_all(&mut *tx, Utc::now(), usuario.id, &observacao)
            .await?;

        let mut inseridos: u64 = 0;
        let mut atualizados: u64 = 0;
        for linha in &linhas {
            match self
                .eletricista_repo
                .find_by_matricula(&mut *tx, &linha.matricula)
                .await?
            {
                Some(existente) => {
                    self.eletricista_repo
                        .update_from_import(&mut *tx, existente.id, linha)
                        .await?;
                    atualizados += 1;
                }
                None => {
                    self.eletricista_repo.insert_from_import(&mut *tx, linha).await?;
                    inseridos += 1;
                }
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Estrutura importada de {}: {} arquivados, {} inseridos, {} atualizados",
            nome_arquivo,
            arquivados,
            inseridos,
            atualizados
        );
        Ok(ResultadoImportacao { arquivados, inseridos, atualizados })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passa_direto_pela_decodificacao() {
        let texto = "matricula;colaborador\n123;JOÃO";
        assert_eq!(decodificar_conteudo(texto.as_bytes()), texto);
    }

    #[test]
    fn latin1_e_decodificado_byte_a_byte() {
        // "JOÃO" em Latin-1: Ã = 0xC3
        let bytes = [b'J', b'O', 0xC3, b'O'];
        assert_eq!(decodificar_conteudo(&bytes), "JOÃO");
    }

    #[test]
    fn le_linhas_com_todas_as_colunas() {
        let conteudo = "matricula;colaborador;prefixo;superv_campo;descr_situacao\n\
                        1001;MARIA SILVA;VPL-1001;SUP1;ATIVO\n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        assert_eq!(linhas.len(), 1);
        assert_eq!(linhas[0].matricula, "1001");
        assert_eq!(linhas[0].colaborador, "MARIA SILVA");
        assert_eq!(linhas[0].prefixo.as_deref(), Some("VPL-1001"));
        assert_eq!(linhas[0].superv_campo.as_deref(), Some("SUP1"));
        assert_eq!(linhas[0].descr_situacao.as_deref(), Some("ATIVO"));
    }

    #[test]
    fn cabecalhos_sao_reconhecidos_sem_distincao_de_caixa() {
        let conteudo = "MATRICULA;Colaborador\n1001;MARIA SILVA\n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        assert_eq!(linhas.len(), 1);
    }

    #[test]
    fn linha_sem_matricula_ou_colaborador_e_pulada() {
        let conteudo = "matricula;colaborador\n\
                        1001;MARIA SILVA\n\
                        ;SEM MATRICULA\n\
                        1003;\n\
                        1004;PEDRO COSTA\n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        let matriculas: Vec<&str> = linhas.iter().map(|l| l.matricula.as_str()).collect();
        assert_eq!(matriculas, vec!["1001", "1004"]);
    }

    #[test]
    fn celulas_vazias_viram_none() {
        let conteudo = "matricula;colaborador;prefixo;base\n1001;MARIA SILVA;;  \n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        assert_eq!(linhas[0].prefixo, None);
        assert_eq!(linhas[0].base, None);
    }

    // Arquivo só com linhas inválidas não é erro de leitura: a importação
    // segue, arquiva o cadastro e não insere nem atualiza nada.
    #[test]
    fn arquivo_sem_linhas_validas_parseia_para_lista_vazia() {
        let conteudo = "matricula;colaborador\n;SEM MATRICULA\n1003;\n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        assert!(linhas.is_empty());
    }

    #[test]
    fn arquivo_sem_colunas_obrigatorias_e_rejeitado() {
        let conteudo = "nome;setor\nMARIA;LESTE\n";
        assert!(ler_linhas_estrutura(conteudo).is_err());
    }

    #[test]
    fn bom_no_primeiro_cabecalho_e_ignorado() {
        let conteudo = "\u{feff}matricula;colaborador\n1001;MARIA SILVA\n";
        let linhas = ler_linhas_estrutura(conteudo).unwrap();
        assert_eq!(linhas.len(), 1);
    }
}
