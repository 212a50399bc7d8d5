//! Localized copy, rendered as Telegram HTML.
//!
//! Static copy is trusted HTML; anything coming from config, users, or feeds is
//! escaped before it is spliced in.

use crate::{config::Config, domain::Lang, formatting::escape_html};

const RULE: &str = "─────────────────────";

pub fn welcome(lang: Lang, cfg: &Config) -> String {
    let link = escape_html(&cfg.broker_ref_link);
    match lang {
        Lang::En => format!(
            "🚀 <b>Welcome to the Apex Golden Community!</b>\n\n\
             You've just entered the Apex Golden Capital paddock. Here, the gold market (XAUUSD) \
             is handled with the precision of a Formula 1 engine. 🏎️💨\n\n\
             Our PAMM Account is not just copy trading; it's direct access to the technology and \
             manual execution of the enigmatic Apex Ghost.\n\n\
             📌 <b>First Step: Prepare your machine</b>\n\
             Register with our official partner broker (Vantage) through the exclusive link below:\n{link}\n\n\
             💼 <b>What happens now?</b>\n\
             After registration, you can connect to the PAMM Account. Let our team and our EAs \
             drive for you, with full transparency and optimized performance."
        ),
        Lang::Pt => format!(
            "🚀 <b>Bem-vindo à Apex Golden Community!</b>\n\n\
             Você acaba de entrar no paddock da Apex Golden Capital. Aqui, o mercado de ouro (XAUUSD) \
             é tratado com a precisão de um motor de Fórmula 1. 🏎️💨\n\n\
             Nossa Conta PAMM não é apenas um copy trading; é o acesso direto à tecnologia e à \
             execução manual do enigmático Apex Ghost.\n\n\
             📌 <b>Primeiro Passo: Prepare sua máquina</b>\n\
             Cadastre-se na nossa corretora parceira oficial (Vantage) através do link exclusivo abaixo:\n{link}\n\n\
             💼 <b>O que acontece agora?</b>\n\
             Após o cadastro, você poderá conectar à Conta PAMM. Deixe que nossa equipe e nossos EAs \
             pilotem por você, com total transparência e performance otimizada."
        ),
        Lang::Es => format!(
            "🚀 <b>¡Bienvenido a la Apex Golden Community!</b>\n\n\
             Acabas de entrar en el paddock de Apex Golden Capital. Aquí, el mercado del oro (XAUUSD) \
             se trata con la precisión de un motor de Fórmula 1. 🏎️💨\n\n\
             Nuestra Cuenta PAMM no es solo copy trading; es el acceso directo a la tecnología y la \
             ejecución manual del enigmático Apex Ghost.\n\n\
             📌 <b>Primer Paso: Prepara tu máquina</b>\n\
             Regístrate en nuestro broker socio oficial (Vantage) a través del enlace exclusivo:\n{link}\n\n\
             💼 <b>¿Qué pasa ahora?</b>\n\
             Tras el registro, podrás conectarte a la Cuenta PAMM. Deja que nuestro equipo y nuestros EAs \
             conduzcan por ti, con total transparencia y rendimiento optimizado."
        ),
    }
}

pub fn pamm_explanation(lang: Lang, cfg: &Config) -> String {
    let link = escape_html(&cfg.pamm_link);
    match lang {
        Lang::En => format!(
            "📊 <b>What is the Apex PAMM Experience?</b>\n\n\
             Imagine having an elite driver managing your capital in the world's most valuable market. \
             The PAMM Account is your access to the passenger seat in our racing team. \
             You bring the fuel (capital) and Apex Zero takes the wheel.\n\n\
             ✅ <b>Our Engineering Advantages:</b>\n\n\
             🏎️ <b>Professional Driving:</b> Hybrid management (EAs + Manual) focused exclusively on XAUUSD.\n\n\
             📈 <b>Proportional Performance:</b> If our team wins, you win. Profits are distributed precisely.\n\n\
             🔍 <b>Real-Time Telemetry:</b> Absolute transparency. Track every curve and every trade from your dashboard.\n\n\
             ⛽ <b>Tank Control:</b> The capital is yours. You maintain custody and are free to withdraw your funds according to the track rules.\n\n\
             👉 <b>Take your position on the grid:</b> {link}"
        ),
        Lang::Pt => format!(
            "📊 <b>O que é a Experiência Apex PAMM?</b>\n\n\
             Imagine ter um piloto de elite conduzindo seu capital no mercado mais valioso do mundo. \
             A Conta PAMM é o seu acesso ao assento de passageiro na nossa escuderia. \
             Você entra com o combustível (capital) e o Apex Zero assume o volante.\n\n\
             ✅ <b>Vantagens da nossa Engenharia:</b>\n\n\
             🏎️ <b>Pilotagem Profissional:</b> Gestão híbrida (EAs + Manual) focada exclusivamente em XAUUSD.\n\n\
             📈 <b>Performance Proporcional:</b> Se a nossa equipe vence, você vence. Os lucros são distribuídos de forma exata.\n\n\
             🔍 <b>Telemetria em Tempo Real:</b> Transparência absoluta. Você acompanha cada curva e cada operação direto do seu dashboard.\n\n\
             ⛽ <b>Controle do Tanque:</b> O capital é seu. Você mantém a custódia e tem a liberdade de sacar seus fundos conforme as regras da pista.\n\n\
             👉 <b>Assuma sua posição no grid:</b> {link}"
        ),
        Lang::Es => format!(
            "📊 <b>¿Qué es la Experiencia Apex PAMM?</b>\n\n\
             Imagina tener un piloto de élite conduciendo tu capital en el mercado más valioso del mundo. \
             La Cuenta PAMM es tu acceso al asiento de pasajero en nuestra escudería. \
             Tú pones el combustible (capital) y Apex Zero toma el volante.\n\n\
             ✅ <b>Ventajas de nuestra Ingeniería:</b>\n\n\
             🏎️ <b>Pilotaje Profesional:</b> Gestión híbrida (EAs + Manual) enfocada exclusivamente en XAUUSD.\n\n\
             📈 <b>Rendimiento Proporcional:</b> Si nuestro equipo gana, tú ganas. Las ganancias se distribuyen con exactitud.\n\n\
             🔍 <b>Telemetría en Tiempo Real:</b> Transparencia absoluta. Sigues cada curva y cada operación desde tu dashboard.\n\n\
             ⛽ <b>Control del Tanque:</b> El capital es tuyo. Mantienes la custodia y tienes libertad de retirar tus fondos según las reglas de la pista.\n\n\
             👉 <b>Toma tu posición en la parrilla:</b> {link}"
        ),
    }
}

pub fn pamm_group_welcome(lang: Lang) -> &'static str {
    match lang {
        Lang::En => {
            "🏎️ <b>Welcome to the Apex Golden Capital — PAMM Group!</b>\n\n\
             Congratulations on your arrival and on making an excellent decision! \
             You are now part of an exclusive community of investors who trust the precision \
             and expertise of the Apex Ghost. 👻\n\n\
             Stay tuned — market updates, XAUUSD news and performance reports will be shared here regularly. 📊"
        }
        Lang::Pt => {
            "🏎️ <b>Bem-vindo ao Apex Golden Capital — Grupo PAMM!</b>\n\n\
             Parabéns pela chegada e pela excelente decisão! \
             Você agora faz parte de uma comunidade exclusiva de investidores que confiam na precisão \
             e expertise do Apex Ghost. 👻\n\n\
             Fique atento — atualizações de mercado, notícias do XAUUSD e relatórios de performance serão compartilhados aqui regularmente. 📊"
        }
        Lang::Es => {
            "🏎️ <b>¡Bienvenido a Apex Golden Capital — Grupo PAMM!</b>\n\n\
             ¡Felicitaciones por tu llegada y por tomar una excelente decisión! \
             Ahora formas parte de una comunidad exclusiva de inversores que confían en la precisión \
             y experiencia del Apex Ghost. 👻\n\n\
             Estate atento — actualizaciones del mercado, noticias de XAUUSD e informes de rendimiento se compartirán aquí regularmente. 📊"
        }
    }
}

pub fn no_thanks_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "No thanks",
        Lang::Pt => "Não, obrigado",
        Lang::Es => "No, gracias",
    }
}

pub fn learn_more_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Learn more 🏎️",
        Lang::Pt => "Entenda mais 🏎️",
        Lang::Es => "Saber más 🏎️",
    }
}

pub fn talk_to_owner_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Talk to Apex Ghost 👻",
        Lang::Pt => "Falar direto com o Apex Ghost 👻",
        Lang::Es => "Hablar con Apex Ghost 👻",
    }
}

/// Message pre-filled in the chat with the owner.
pub fn owner_contact_message(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Hello! I'm interested in the Apex Golden Community PAMM Account.",
        Lang::Pt => "Olá! Tenho interesse na Conta PAMM da Apex Golden Community.",
        Lang::Es => "¡Hola! Estoy interesado en la Cuenta PAMM de Apex Golden Community.",
    }
}

pub fn declined_ack(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "👍 No problem! Feel free to reach out anytime.",
        Lang::Pt => "👍 Sem problemas! Estamos à disposição.",
        Lang::Es => "👍 ¡Sin problema! Estamos disponibles cuando quieras.",
    }
}

pub const LANGUAGE_PICKER: &str = "👋 <b>Welcome / Bem-vindo / Bienvenido!</b>\n\n\
    🇬🇧 Welcome to <b>Apex Golden Community</b>! Please choose your language:\n\
    🇧🇷 Bem-vindo à <b>Apex Golden Community</b>! Por favor, escolha seu idioma:\n\
    🇪🇸 ¡Bienvenido a <b>Apex Golden Community</b>! Por favor, elige tu idioma:";

pub const PAMM_LANGUAGE_PICKER: &str = "👋 <b>Welcome / Bem-vindo / Bienvenido!</b>\n\n\
    🇬🇧 Please choose your language to continue:\n\
    🇧🇷 Por favor, escolha seu idioma para continuar:\n\
    🇪🇸 Por favor, elige tu idioma para continuar:";

pub const GROUP_ACTIVATED: &str = "✅ Apex Assistant is active in this group!";
pub const BROADCAST_PRIVATE_REJECTED: &str = "⚠️ This command must be used inside the group.";
pub const BROADCAST_NEWS_GROUP_REJECTED: &str = "⚠️ This command is not available in this group.";
pub const NEWS_WRONG_GROUP: &str = "⚠️ This command is only available in the PAMM group.";
pub const NEWS_CHECKING: &str = "🔍 Checking for news...";
pub const NOT_AN_OPERATOR: &str = "⛔ This command is restricted to the bot operators.";

pub const START_PRIVATE_LABEL: &str = "👋 Start / Começar / Comenzar";
pub const BROADCAST_BUTTON_LABEL: &str = "📊 Learn more / Saiba mais / Saber más";
pub const NEWS_BUTTON_LABEL: &str = "📰 Read / Leia / Leer";

pub fn news_group_member_welcome(mention: &str) -> String {
    format!(
        "👋 {mention}\n\n{}\n\n{RULE}\n\n{}\n\n{RULE}\n\n{}",
        pamm_group_welcome(Lang::En),
        pamm_group_welcome(Lang::Pt),
        pamm_group_welcome(Lang::Es),
    )
}

pub fn community_member_welcome(mention: &str) -> String {
    format!(
        "👋 <b>Welcome / Bem-vindo / Bienvenido</b>, {mention}!\n\n\
         🇬🇧 Welcome to <b>Apex Golden Community</b>! Click below to get started in private.\n\
         🇧🇷 Bem-vindo à <b>Apex Golden Community</b>! Clique abaixo para continuar no privado.\n\
         🇪🇸 ¡Bienvenido a <b>Apex Golden Community</b>! Haz clic abajo para continuar en privado."
    )
}

pub fn broadcast(cfg: &Config) -> String {
    format!(
        "📈 <b>Apex Golden Community — Trading Opportunity</b>\n\n\
         🇬🇧 Join our broker and start copy trading with our PAMM account!\n\
         🇧🇷 Entre na corretora e comece o copy trading com nossa conta PAMM!\n\
         🇪🇸 ¡Únete al bróker y empieza el copy trading con nuestra cuenta PAMM!\n\n\
         👉 {}",
        escape_html(&cfg.broker_ref_link)
    )
}

/// Three-language headline block for the news group. Titles are escaped here.
pub fn news_announcement(title_en: &str, title_pt: &str, title_es: &str) -> String {
    format!(
        "📰 <b>XAUUSD — Market News</b>\n\n{} {}\n\n{} {}\n\n{} {}",
        Lang::En.flag(),
        escape_html(title_en),
        Lang::Pt.flag(),
        escape_html(title_pt),
        Lang::Es.flag(),
        escape_html(title_es),
    )
}

pub fn translation_reply(pt: &str, es: &str) -> String {
    format!(
        "{} <b>PT:</b> {}\n\n{} <b>ES:</b> {}",
        Lang::Pt.flag(),
        escape_html(pt),
        Lang::Es.flag(),
        escape_html(es)
    )
}

pub fn status(active_groups: usize, news_sent: usize, uptime: &str) -> String {
    format!(
        "✅ Bot online.\n📡 Active groups: {active_groups}\n📰 News sent: {news_sent}\n⏱️ Uptime: {}",
        escape_html(uptime)
    )
}
