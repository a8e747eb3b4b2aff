//! Cliente SMTP
//!
//! Transporte asíncrono con pool de conexiones (STARTTLS). Cada envío
//! corre bajo su propio timeout: un SMTP colgado no puede frenar la
//! vuelta completa del job.

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
};

use crate::core::Config;
use crate::utils::{AppError, AppResult};

use super::template;

pub struct MailerService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    contacto: String,
    timeout: Duration,
}

impl MailerService {
    /// Crea el cliente con conexión pooleada al relay configurado.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| anyhow::anyhow!("SMTP relay inválido: {e}"))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "Cliente SMTP creado"
        );

        Ok(Self {
            transport,
            from: format!("\"{}\" <{}>", config.sender_name, config.sender_email),
            contacto: config.contact_phone.clone(),
            timeout: Duration::from_millis(config.mail_timeout_ms),
        })
    }

    /// Envía el aviso de plan vencido a un alumno.
    pub async fn send_aviso_vencido(
        &self,
        destinatario: &str,
        nombre: &str,
        estado: &str,
        fecha_vencimiento: &str,
        modalidad: &str,
    ) -> AppResult<()> {
        let from = self
            .from
            .parse()
            .map_err(|e| AppError::Mail(format!("remitente inválido: {e}")))?;
        let to = destinatario
            .parse()
            .map_err(|e| AppError::Mail(format!("destinatario '{destinatario}' inválido: {e}")))?;

        let html = template::aviso_vencido_html(
            nombre,
            estado,
            fecha_vencimiento,
            modalidad,
            &self.contacto,
        );
        let texto =
            template::aviso_vencido_texto(nombre, estado, fecha_vencimiento, &self.contacto);

        let mensaje = Message::builder()
            .from(from)
            .to(to)
            .subject(template::ASUNTO_VENCIDO)
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(texto))
                    .singlepart(SinglePart::html(html)),
            )
            .map_err(|e| AppError::Mail(format!("no se pudo armar el mensaje: {e}")))?;

        let envio = tokio::time::timeout(self.timeout, self.transport.send(mensaje));
        match envio.await {
            Ok(Ok(_)) => {
                tracing::info!(to = %destinatario, nombre = %nombre, "Aviso de vencimiento enviado");
                Ok(())
            }
            Ok(Err(e)) => Err(AppError::Mail(e.to_string())),
            Err(_) => Err(AppError::Mail(format!(
                "timeout de {} ms enviando a {destinatario}",
                self.timeout.as_millis()
            ))),
        }
    }
}
