//! Built-in curated RSS feed catalog.
//!
//! Feeds are grouped by region and beat so the list stays reviewable;
//! the pipeline only ever consumes the flattened, deduplicated URL list
//! from [`all_feeds`].

struct FeedGroup {
    #[allow(dead_code)]
    name: &'static str,
    feeds: &'static [&'static str],
    children: &'static [FeedGroup],
}

static CATALOG: &[FeedGroup] = &[
    FeedGroup {
        name: "nacionais",
        feeds: &[],
        children: &[
            FeedGroup {
                name: "grandes_portais",
                feeds: &[
                    "https://g1.globo.com/rss/g1/",
                    "https://feeds.folha.uol.com.br/emcimadahora/rss091.xml",
                    "https://www.estadao.com.br/rss/ultimas.xml",
                    "https://rss.uol.com.br/feed/noticias.xml",
                    "https://www.cnnbrasil.com.br/feed/",
                ],
                children: &[],
            },
            FeedGroup {
                name: "regionais",
                feeds: &[
                    "https://www.correiobraziliense.com.br/rss/noticia/brasil.xml",
                    "https://www.gazetadopovo.com.br/feed/rss/republica.xml",
                ],
                children: &[],
            },
            FeedGroup {
                name: "sao_paulo",
                feeds: &[],
                children: &[
                    FeedGroup {
                        name: "capital",
                        feeds: &[
                            "https://g1.globo.com/rss/g1/sao-paulo/",
                            "https://www.metropoles.com/sao-paulo/feed",
                        ],
                        children: &[],
                    },
                    FeedGroup {
                        name: "sao_jose_do_rio_preto",
                        feeds: &[
                            "https://www.diariodaregiao.com.br/rss.xml",
                            "https://www.sbtinterior.com/rss/noticias.xml",
                        ],
                        children: &[],
                    },
                    FeedGroup {
                        name: "olimpia",
                        feeds: &[
                            "https://www.diariodeolimpia.com.br/rss",
                            "https://www.olimpia24horas.com.br/feed/",
                        ],
                        children: &[],
                    },
                    FeedGroup {
                        name: "interior",
                        feeds: &[
                            // Rio Preto dailies cover the Olimpia region too.
                            "https://www.diariodeolimpia.com.br/rss",
                            "https://g1.globo.com/rss/g1/sp/sao-jose-do-rio-preto-aracatuba/",
                        ],
                        children: &[],
                    },
                ],
            },
            FeedGroup {
                name: "minas_gerais",
                feeds: &[
                    "https://g1.globo.com/rss/g1/minas-gerais/",
                    "https://www.em.com.br/rss/noticia/gerais/rss.xml",
                ],
                children: &[],
            },
            FeedGroup {
                name: "rio_de_janeiro",
                feeds: &[
                    "https://g1.globo.com/rss/g1/rio-de-janeiro/",
                    "https://odia.ig.com.br/rss/rio-de-janeiro.xml",
                ],
                children: &[],
            },
            FeedGroup {
                name: "brasilia",
                feeds: &["https://www.metropoles.com/distrito-federal/feed"],
                children: &[],
            },
            FeedGroup {
                name: "economia",
                feeds: &[
                    "https://g1.globo.com/rss/g1/economia/",
                    "https://www.infomoney.com.br/feed/",
                    "https://valor.globo.com/rss/",
                ],
                children: &[],
            },
            FeedGroup {
                name: "tecnologia",
                feeds: &[
                    "https://g1.globo.com/rss/g1/tecnologia/",
                    "https://tecnoblog.net/feed/",
                    "https://canaltech.com.br/rss/",
                ],
                children: &[],
            },
            FeedGroup {
                name: "agro",
                feeds: &[
                    "https://g1.globo.com/rss/g1/economia/agronegocios/",
                    "https://www.canalrural.com.br/feed/",
                ],
                children: &[],
            },
            FeedGroup {
                name: "politica",
                feeds: &[
                    "https://g1.globo.com/rss/g1/politica/",
                    "https://www.poder360.com.br/feed/",
                ],
                children: &[],
            },
            FeedGroup {
                name: "imobiliario",
                feeds: &["https://www.infomoney.com.br/minhas-financas/imoveis/feed/"],
                children: &[],
            },
            FeedGroup {
                name: "parques_turismo",
                feeds: &[
                    "https://www.panrotas.com.br/rss/noticias.xml",
                    "https://www.mercadoeeventos.com.br/feed/",
                ],
                children: &[],
            },
        ],
    },
    FeedGroup {
        name: "internacionais",
        feeds: &[],
        children: &[FeedGroup {
            name: "principais",
            feeds: &[
                "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
                "https://feeds.bbci.co.uk/portuguese/rss.xml",
            ],
            children: &[],
        }],
    },
];

/// Flatten the catalog into a deduplicated URL list, preserving first
/// occurrence order.
pub(crate) fn all_feeds() -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut feeds = Vec::new();
    collect(CATALOG, &mut seen, &mut feeds);
    feeds
}

fn collect(
    groups: &[FeedGroup],
    seen: &mut std::collections::HashSet<&'static str>,
    out: &mut Vec<String>,
) {
    for group in groups {
        for &url in group.feeds {
            if seen.insert(url) {
                out.push(url.to_string());
            }
        }
        collect(group.children, seen, out);
    }
}
