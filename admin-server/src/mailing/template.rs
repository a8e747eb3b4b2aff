//! Plantilla del aviso de vencimiento
//!
//! El HTML es un literal (tablas + estilos inline, lo único que los
//! clientes de correo renderizan parejo), con la misma pieza que venía
//! mandando el sistema.

pub const ASUNTO_VENCIDO: &str = "⚠️ Tu plan venció – Regularizá para seguir entrenando";

/// Cuerpo HTML del aviso.
pub fn aviso_vencido_html(
    nombre: &str,
    estado: &str,
    fecha_vencimiento: &str,
    modalidad: &str,
    contacto: &str,
) -> String {
    format!(
        r#"<div style="margin:0; padding:0; background-color:#f4f4f5;">
  <table width="100%" cellpadding="0" cellspacing="0">
    <tr>
      <td align="center">
        <table width="520" cellpadding="0" cellspacing="0" style="background-color:#ffffff; font-family: Arial, Helvetica, sans-serif; color:#111827;">
          <tr>
            <td style="background-color:#22b567; padding:16px; text-align:center;">
              <h1 style="margin:0; font-size:20px; font-weight:600; color:#ffffff;">
                Aviso de vencimiento de plan
              </h1>
            </td>
          </tr>
          <tr>
            <td style="padding:26px 24px;">
              <p style="font-size:15px; margin:0 0 14px 0;">
                Hola <strong>{nombre}</strong>,
              </p>
              <p style="font-size:15px; margin:0 0 14px 0;">
                Te informamos que tu plan de entrenamiento actualmente se encuentra en estado
                <strong style="color:#dc2626;">{estado}</strong>.
              </p>
              <div style="background-color:#f6fffa; border:1px solid #22b567; border-radius:10px; padding:14px 16px; margin:18px 0; font-size:14px;">
                <p style="margin:0 0 6px 0;">
                  <strong>Plan contratado:</strong>
                  <span style="color:#22b567; font-weight:600;">{modalidad}</span>
                </p>
                <p style="margin:0;">
                  <strong>Fecha de vencimiento:</strong>
                  <span style="color:#22b567; font-weight:600;">{fecha_vencimiento}</span>
                </p>
              </div>
              <p style="font-size:15px; margin:16px 0;">
                Para continuar accediendo a tus
                <strong style="color:#22b567;">planificaciones personalizadas</strong>
                y al
                <strong style="color:#22b567;">seguimiento profesional</strong>,
                es necesario <strong>regularizar el pago</strong>.
              </p>
              <p style="font-size:15px; margin:16px 0;">
                Si necesitás ayuda o querés coordinar la renovación,
                podés comunicarte directamente al
                <strong style="color:#22b567;">{contacto}</strong>.
              </p>
              <hr style="border:none; border-top:1px solid #e5e7eb; margin:26px 0;" />
              <p style="font-size:13px; text-align:center; margin:0; color:#6b7280;">
                <strong style="color:#22b567;">Rodrigo Montenegro</strong><br />
                Entrenador Personal
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</div>
"#
    )
}

/// Alternativa de texto plano para clientes sin HTML.
pub fn aviso_vencido_texto(
    nombre: &str,
    estado: &str,
    fecha_vencimiento: &str,
    contacto: &str,
) -> String {
    format!(
        "Hola {nombre},\n\n\
         Tu plan de entrenamiento se encuentra en estado {estado} \
         (venció el {fecha_vencimiento}).\n\n\
         Para seguir accediendo a tus planificaciones es necesario \
         regularizar el pago. Podés comunicarte al {contacto}.\n\n\
         Rodrigo Montenegro - Entrenador Personal\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_interpola_los_campos() {
        let html = aviso_vencido_html(
            "Carlos",
            "VENCIDO",
            "10/02/2024",
            "Presencial",
            "+54 9 3516 67-1026",
        );
        for esperado in ["Carlos", "VENCIDO", "10/02/2024", "Presencial", "67-1026"] {
            assert!(html.contains(esperado), "falta {esperado}");
        }
    }

    #[test]
    fn test_texto_plano() {
        let texto = aviso_vencido_texto("Carlos", "VENCIDO", "10/02/2024", "351");
        assert!(texto.contains("Carlos"));
        assert!(texto.contains("VENCIDO"));
    }
}
